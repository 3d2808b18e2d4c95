//! Client-side search over the canonical collection.

use crate::contract::model::Member;

/// Visible subset of `members` for `query`.
///
/// A member matches when the lowercased query is a substring of its lowercased
/// name or email. An empty query matches everything. Canonical order is kept
/// and the input is never touched.
pub fn visible_members<'a>(members: &'a [Member], query: &str) -> Vec<&'a Member> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return members.iter().collect();
    }
    members.iter().filter(|m| matches(m, &needle)).collect()
}

fn matches(member: &Member, needle: &str) -> bool {
    member.name.to_lowercase().contains(needle) || member.email.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::model::{MemberId, Role};

    fn member(id: u64, name: &str, email: &str) -> Member {
        Member {
            id: MemberId::from(id),
            name: name.into(),
            email: email.into(),
            role: Role::Member,
        }
    }

    fn directory() -> Vec<Member> {
        vec![
            member(1, "Ana Silva", "ana@x.com"),
            member(2, "Bruno Costa", "bruno@corp.io"),
            member(3, "Carla Dias", "carla.ANA@corp.io"),
            member(4, "Diego Souza", "diego@x.com"),
        ]
    }

    fn ids(v: &[&Member]) -> Vec<String> {
        v.iter().map(|m| m.id.to_string()).collect()
    }

    #[test]
    fn single_record_hit_and_miss() {
        let c = vec![member(1, "Ana Silva", "ana@x.com")];
        assert_eq!(visible_members(&c, "ana"), vec![&c[0]]);
        assert!(visible_members(&c, "zzz").is_empty());
    }

    #[test]
    fn empty_query_is_identity() {
        let c = directory();
        let all: Vec<&Member> = c.iter().collect();
        assert_eq!(visible_members(&c, ""), all);
    }

    #[test]
    fn matches_name_or_email_case_insensitively() {
        let c = directory();
        assert_eq!(ids(&visible_members(&c, "ANA")), ["1", "3"]);
        assert_eq!(ids(&visible_members(&c, "corp.IO")), ["2", "3"]);
        assert_eq!(ids(&visible_members(&c, "souza")), ["4"]);
    }

    #[test]
    fn whitespace_is_part_of_the_query() {
        let c = directory();
        assert_eq!(ids(&visible_members(&c, "a s")), ["1"]);
        assert!(visible_members(&c, " ").len() == 4);
    }

    #[test]
    fn result_is_an_ordered_subset() {
        let c = directory();
        for q in ["", "a", "x.com", "o", "nope"] {
            let visible = visible_members(&c, q);
            let mut cursor = 0;
            for v in &visible {
                let pos = c[cursor..]
                    .iter()
                    .position(|m| m == *v)
                    .expect("visible member must come from the collection, in order");
                cursor += pos + 1;
                let q = q.to_lowercase();
                assert!(
                    v.name.to_lowercase().contains(&q) || v.email.to_lowercase().contains(&q)
                );
            }
        }
    }

    #[test]
    fn repeated_calls_are_identical_and_leave_input_alone() {
        let c = directory();
        let before = c.clone();
        let first = visible_members(&c, "co");
        let second = visible_members(&c, "co");
        assert_eq!(first, second);
        assert_eq!(c, before);
    }

    #[test]
    fn non_ascii_case_folding() {
        let c = vec![member(9, "ÉLODIE Martins", "elodie@x.com")];
        assert_eq!(visible_members(&c, "élodie").len(), 1);
    }
}
