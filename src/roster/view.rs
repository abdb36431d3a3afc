use crate::models::Teacher;

/// Heading used for teachers without any category. Keeping it a constant means
/// the gallery and the tests agree on the exact label.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// One gallery section: a category heading plus the teachers grouped under it,
/// in roster order.
#[derive(Debug, Clone)]
pub struct CategoryGroup {
    pub title: String,
    pub teachers: Vec<Teacher>,
}

/// Build the grouped gallery view from the ordered roster and the active
/// filters. Pure: the input slice is never mutated.
///
/// The caller is expected to pass records already scoped to the gallery
/// (published only, sorted by order index); this function only filters and
/// groups. An empty result means the caller should render an explicit
/// empty-state instead of an empty grid.
pub fn compute_view(
    teachers: &[Teacher],
    query: &str,
    category: Option<&str>,
    subject: Option<&str>,
) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();

    for teacher in teachers {
        if !matches_filters(teacher, query, category, subject) {
            continue;
        }

        let title = teacher
            .categories
            .first()
            .map(String::as_str)
            .unwrap_or(UNCATEGORIZED);

        // Group headings appear in first-occurrence order, not alphabetically,
        // so the roster order decides the section order too.
        if let Some(group) = groups.iter_mut().find(|group| group.title == title) {
            group.teachers.push(teacher.clone());
        } else {
            groups.push(CategoryGroup {
                title: title.to_string(),
                teachers: vec![teacher.clone()],
            });
        }
    }

    groups
}

/// Whether a single record passes the search and both membership filters.
/// All three predicates must hold.
pub fn matches_filters(
    teacher: &Teacher,
    query: &str,
    category: Option<&str>,
    subject: Option<&str>,
) -> bool {
    let query = query.trim().to_lowercase();
    let matches_search =
        query.is_empty() || teacher.full_name().to_lowercase().contains(&query);

    let matches_category = match category {
        Some(wanted) => teacher.categories.iter().any(|c| c == wanted),
        None => true,
    };

    let matches_subject = match subject {
        Some(wanted) => teacher.subjects.iter().any(|s| s == wanted),
        None => true,
    };

    matches_search && matches_category && matches_subject
}

/// Distinct category names across the unfiltered roster, sorted ascending.
/// Feeds the category filter control.
pub fn category_options(teachers: &[Teacher]) -> Vec<String> {
    distinct_sorted(teachers.iter().flat_map(|t| t.categories.iter()))
}

/// Distinct subject names across the unfiltered roster, sorted ascending.
pub fn subject_options(teachers: &[Teacher]) -> Vec<String> {
    distinct_sorted(teachers.iter().flat_map(|t| t.subjects.iter()))
}

fn distinct_sorted<'a>(values: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut options: Vec<String> = values.cloned().collect();
    options.sort();
    options.dedup();
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teacher(
        id: i64,
        last: &str,
        first: &str,
        categories: &[&str],
        subjects: &[&str],
    ) -> Teacher {
        Teacher {
            id,
            last_name: last.to_string(),
            first_name: first.to_string(),
            middle_name: String::new(),
            position: "Преподаватель".to_string(),
            categories: categories.iter().map(|c| c.to_string()).collect(),
            subjects: subjects.iter().map(|s| s.to_string()).collect(),
            bio: String::new(),
            photo_url: String::new(),
            contact_email: String::new(),
            contact_phone: String::new(),
            public: true,
            order_index: id,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let t = teacher(1, "Иванов", "Анна", &[], &[]);
        assert!(matches_filters(&t, "иван", None, None));
        assert!(matches_filters(&t, "АННА", None, None));
        assert!(!matches_filters(&t, "Петров", None, None));
    }

    #[test]
    fn empty_query_matches_everything() {
        let t = teacher(1, "Иванов", "Анна", &[], &[]);
        assert!(matches_filters(&t, "", None, None));
        assert!(matches_filters(&t, "   ", None, None));
    }

    #[test]
    fn category_filter_is_exact_membership() {
        let t = teacher(1, "Иванов", "Анна", &["Математика", "Физика"], &[]);
        assert!(matches_filters(&t, "", Some("Физика"), None));
        assert!(!matches_filters(&t, "", Some("Химия"), None));
        // Membership, not prefix matching.
        assert!(!matches_filters(&t, "", Some("Физ"), None));
    }

    #[test]
    fn filter_combination_is_and() {
        let t = teacher(1, "Иванов", "Анна", &["Математика"], &["Алгебра"]);
        // Passes search and category but fails the subject filter.
        assert!(!matches_filters(&t, "иван", Some("Математика"), Some("Физика")));
        assert!(matches_filters(&t, "иван", Some("Математика"), Some("Алгебра")));
    }

    #[test]
    fn grouping_uses_first_category_only() {
        let roster = [teacher(1, "Иванов", "Анна", &["Математика", "Физика"], &[])];
        let groups = compute_view(&roster, "", None, None);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].title, "Математика");

        // The active subject filter does not change the grouping key.
        let roster = [teacher(1, "Иванов", "Анна", &["Математика", "Физика"], &["Химия"])];
        let groups = compute_view(&roster, "", None, Some("Химия"));
        assert_eq!(groups[0].title, "Математика");
    }

    #[test]
    fn empty_categories_fall_into_fallback_group() {
        let roster = [
            teacher(1, "Иванов", "Анна", &[], &[]),
            teacher(2, "Петров", "Борис", &[], &[]),
        ];
        let groups = compute_view(&roster, "", None, None);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].title, UNCATEGORIZED);
        assert_eq!(groups[0].teachers.len(), 2);
    }

    #[test]
    fn group_headings_keep_first_occurrence_order() {
        let roster = [
            teacher(1, "Иванов", "Анна", &["Физика"], &[]),
            teacher(2, "Петров", "Борис", &["Алгебра"], &[]),
            teacher(3, "Сидоров", "Вера", &["Физика"], &[]),
        ];
        let groups = compute_view(&roster, "", None, None);
        let titles: Vec<&str> = groups.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, ["Физика", "Алгебра"]);
        assert_eq!(groups[0].teachers.len(), 2);
    }

    #[test]
    fn no_matches_yield_zero_groups() {
        let roster = [teacher(1, "Иванов", "Анна", &["Математика"], &[])];
        let groups = compute_view(&roster, "Петров", None, None);
        assert!(groups.is_empty());
    }

    #[test]
    fn option_lists_are_deduplicated_and_sorted() {
        let roster = [
            teacher(1, "Иванов", "Анна", &[], &["Физика", "Химия", "Физика"]),
            teacher(2, "Петров", "Борис", &[], &["Алгебра"]),
        ];
        let options = subject_options(&roster);
        assert_eq!(options, ["Алгебра", "Физика", "Химия"]);
    }
}
