//! Category and sub-item selection checks.

use crate::issue::Issue;
use crate::rules::SelectionRule;

/// Check the category/sub-item selection state at submit time.
pub fn check(rule: &SelectionRule, category: Option<&str>, sub_items: &[String]) -> Vec<Issue> {
    let mut issues = Vec::new();

    if category.is_none() {
        issues.push(Issue::CategoryMissing {
            label: rule.category_label.clone(),
        });
        // Sub-items are meaningless without a category; stop here.
        return issues;
    }

    if sub_items.len() < rule.min_sub_items {
        issues.push(Issue::SubItemsMissing {
            label: rule.sub_item_label.clone(),
            exactly_one: rule.max_sub_items == 1,
        });
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_category_short_circuits() {
        let rule = SelectionRule::multi("department", "course", 2);
        let issues = check(&rule, None, &[]);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message(), "Please select a department");
    }

    #[test]
    fn missing_sub_items() {
        let rule = SelectionRule::multi("department", "course", 2);
        let issues = check(&rule, Some("School of Design"), &[]);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message(), "Please select at least one course");
    }

    #[test]
    fn single_select_message() {
        let rule = SelectionRule::single("department", "course");
        let issues = check(&rule, Some("School of Design"), &[]);
        assert_eq!(issues[0].message(), "Please select one course");
    }

    #[test]
    fn satisfied_selection_is_clean() {
        let rule = SelectionRule::multi("department", "course", 2);
        let chosen = vec!["B. Design Product".to_string()];
        assert!(check(&rule, Some("School of Design"), &chosen).is_empty());
    }
}
