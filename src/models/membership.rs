/// A (user, project) association
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Membership {
    pub user_id: i32,
    pub project_id: i32,
}
