use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The slice of a blog that the aggregations care about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct BlogRecord {
    /// Blog title.
    #[schema(example = "Go To Statement Considered Harmful")]
    pub title: String,
    /// Author display name.
    #[schema(example = "Edsger W. Dijkstra")]
    pub author: String,
    /// Like count. 64-bit so per-author sums cannot overflow.
    #[schema(example = 12)]
    pub likes: i64,
}

/// An author together with how many blogs they have written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AuthorBlogCount {
    #[schema(example = "Robert C. Martin")]
    pub author: String,
    #[schema(example = 3)]
    pub blogs: u64,
}

/// An author together with the sum of likes across their blogs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AuthorLikeTotal {
    #[schema(example = "Edsger W. Dijkstra")]
    pub author: String,
    #[schema(example = 17)]
    pub likes: i64,
}

/// Sum of likes across all blogs. Zero for an empty slice.
pub fn total_likes(blogs: &[BlogRecord]) -> i64 {
    blogs.iter().map(|blog| blog.likes).sum()
}

/// The blog with the highest like count.
///
/// Ties go to the earliest such blog in input order. `None` for an empty
/// slice.
pub fn favorite_blog(blogs: &[BlogRecord]) -> Option<&BlogRecord> {
    let mut best: Option<&BlogRecord> = None;
    for blog in blogs {
        if best.is_none_or(|current| blog.likes > current.likes) {
            best = Some(blog);
        }
    }
    best
}

/// The author with the most blogs, and the count.
///
/// Ties go to the author whose first blog appears earliest in the input.
/// `None` for an empty slice.
pub fn most_blogs(blogs: &[BlogRecord]) -> Option<AuthorBlogCount> {
    pick_max_by_author(blogs, |_| 1u64).map(|(author, blogs)| AuthorBlogCount {
        author: author.to_string(),
        blogs,
    })
}

/// The author whose blogs have the highest combined like count.
///
/// Same tie-break and empty handling as [`most_blogs`].
pub fn most_likes(blogs: &[BlogRecord]) -> Option<AuthorLikeTotal> {
    pick_max_by_author(blogs, |blog| blog.likes).map(|(author, likes)| AuthorLikeTotal {
        author: author.to_string(),
        likes,
    })
}

/// Group blogs by author, sum `weight` per group, and return the author
/// with the highest total. Authors are scanned in first-appearance order
/// and only a strictly greater total replaces the current best, which is
/// what makes the tie-break deterministic.
fn pick_max_by_author<T>(blogs: &[BlogRecord], weight: impl Fn(&BlogRecord) -> T) -> Option<(&str, T)>
where
    T: Copy + Default + PartialOrd + std::ops::AddAssign,
{
    let mut order: Vec<&str> = Vec::new();
    let mut totals: HashMap<&str, T> = HashMap::new();

    for blog in blogs {
        let total = totals.entry(blog.author.as_str()).or_insert_with(|| {
            order.push(blog.author.as_str());
            T::default()
        });
        *total += weight(blog);
    }

    let mut best: Option<(&str, T)> = None;
    for author in order {
        let total = totals[author];
        if best.is_none_or(|(_, current)| total > current) {
            best = Some((author, total));
        }
    }
    best
}
