use crate::domain::model::{AdminUser, Role};

/// Case-insensitive match on email or role name.
pub fn filter_users<'a>(users: &'a [AdminUser], query: &str) -> Vec<&'a AdminUser> {
    let needle = query.trim().to_lowercase();
    users
        .iter()
        .filter(|user| {
            needle.is_empty()
                || user.email.to_lowercase().contains(&needle)
                || user.role.as_str().contains(&needle)
        })
        .collect()
}

/// Splits into `(admins, users)` keeping the input order.
pub fn split_by_role<'a>(users: &[&'a AdminUser]) -> (Vec<&'a AdminUser>, Vec<&'a AdminUser>) {
    users.iter().copied().partition(|user| user.role == Role::Admin)
}
