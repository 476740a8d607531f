/// Outcome of the ownership check for deleting a blog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteDecision {
    /// The caller owns the blog and may delete it.
    Permitted,
    /// The blog exists but belongs to someone else. No mutation may occur.
    NotOwner,
    /// The blog does not exist.
    NotFound,
}

/// Decide whether `caller` may delete the blog owned by `stored_owner`.
///
/// `stored_owner` is `None` when the blog was not found. Deletion is
/// permitted exactly when the stored owner id and the caller id are the
/// same identifier. The caller identity must come from an already
/// validated bearer token; this function only compares ids and never
/// touches the store.
pub fn decide_blog_delete(stored_owner: Option<i32>, caller: i32) -> DeleteDecision {
    match stored_owner {
        None => DeleteDecision::NotFound,
        Some(owner) if owner == caller => DeleteDecision::Permitted,
        Some(_) => DeleteDecision::NotOwner,
    }
}
