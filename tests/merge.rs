#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use taskvault::libs::task::{import_merge, Task};

    fn ids(tasks: &[Task]) -> Vec<u32> {
        tasks.iter().map(|t| t.id).collect()
    }

    fn assert_unique(tasks: &[Task]) {
        let unique: HashSet<u32> = tasks.iter().map(|t| t.id).collect();
        assert_eq!(unique.len(), tasks.len(), "duplicate IDs in {:?}", ids(tasks));
    }

    #[test]
    fn test_merge_without_conflicts_keeps_ids() {
        let mut existing = vec![Task::new(1, "A"), Task::new(2, "B")];
        let report = import_merge(&mut existing, vec![Task::new(7, "C")]);

        assert_eq!(report.added, 1);
        assert!(report.reassigned.is_empty());
        assert_eq!(ids(&existing), vec![1, 2, 7]);
    }

    #[test]
    fn test_conflicting_id_is_renumbered() {
        let mut existing = vec![Task::new(1, "A")];
        let report = import_merge(&mut existing, vec![Task::new(1, "B")]);

        assert_eq!(report.reassigned, vec![(1, 2)]);
        assert_eq!(existing[1].title, "B");
        assert_eq!(ids(&existing), vec![1, 2]);
    }

    #[test]
    fn test_renumbering_skips_ids_still_to_come() {
        // The conflicting task must not take an ID a later incoming task keeps.
        let mut existing = vec![Task::new(1, "A"), Task::new(2, "B")];
        let incoming = vec![Task::new(1, "X"), Task::new(5, "Y")];
        let report = import_merge(&mut existing, incoming);

        assert_eq!(report.added, 2);
        assert_eq!(report.reassigned, vec![(1, 6)]);
        assert_eq!(ids(&existing), vec![1, 2, 6, 5]);
        assert_unique(&existing);
    }

    #[test]
    fn test_duplicates_within_incoming_are_renumbered() {
        let mut existing = Vec::new();
        let incoming = vec![Task::new(3, "X"), Task::new(3, "Y"), Task::new(3, "Z")];
        let report = import_merge(&mut existing, incoming);

        assert_eq!(report.reassigned, vec![(3, 4), (3, 5)]);
        assert_unique(&existing);
    }

    #[test]
    fn test_merge_into_empty_list() {
        let mut existing = Vec::new();
        let report = import_merge(&mut existing, vec![Task::new(4, "A"), Task::new(2, "B")]);

        assert_eq!(report.added, 2);
        assert!(report.reassigned.is_empty());
        assert_eq!(ids(&existing), vec![4, 2]);
    }

    #[test]
    fn test_merge_of_same_list_doubles_it_with_unique_ids() {
        let original = vec![Task::new(1, "A"), Task::new(2, "B"), Task::new(3, "C")];
        let mut existing = original.clone();
        let report = import_merge(&mut existing, original);

        assert_eq!(existing.len(), 6);
        assert_eq!(report.reassigned, vec![(1, 4), (2, 5), (3, 6)]);
        assert_unique(&existing);
    }

    #[test]
    fn test_renumbering_wraps_to_lowest_free_id_after_max() {
        let mut existing = vec![Task::new(u32::MAX, "A"), Task::new(1, "B")];
        let incoming = vec![Task::new(u32::MAX, "C"), Task::new(u32::MAX, "D")];
        let report = import_merge(&mut existing, incoming);

        assert_eq!(report.added, 2);
        assert_eq!(report.reassigned, vec![(u32::MAX, 2), (u32::MAX, 3)]);
        assert_unique(&existing);
    }
}
