use serde_json::json;

use crate::common::{TestApp, routes};

mod listing {
    use super::*;

    #[tokio::test]
    async fn all_blogs_are_returned_with_owner_info_embedded() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;
        app.create_blog(&token, "React patterns", "Michael Chan", 7).await;
        app.create_blog(&token, "Type wars", "Robert C. Martin", 2).await;

        let res = app.get(routes::BLOGS).await;

        assert_eq!(res.status, 200);
        let blogs = res.body.as_array().expect("body should be an array");
        assert_eq!(blogs.len(), 2);
        assert_eq!(blogs[0]["title"], "React patterns");
        assert_eq!(blogs[0]["user"]["username"], "alice");
        assert_eq!(blogs[0]["user"]["name"], "alice");
        // The embedded owner is minimal info only.
        assert!(blogs[0]["user"].get("password").is_none());
        assert!(blogs[0]["user"].get("id").is_none());
    }

    #[tokio::test]
    async fn listing_an_empty_store_returns_an_empty_array() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::BLOGS).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body.as_array().expect("array").len(), 0);
    }
}

mod creation {
    use super::*;

    #[tokio::test]
    async fn a_valid_blog_is_saved() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;

        let res = app
            .post_with_token(
                routes::BLOGS,
                &json!({
                    "title": "Go To Statement Considered Harmful",
                    "author": "Edsger W. Dijkstra",
                    "url": "https://example.com/goto",
                    "likes": 5,
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 201);
        assert_eq!(res.body["title"], "Go To Statement Considered Harmful");
        assert_eq!(res.body["author"], "Edsger W. Dijkstra");
        assert_eq!(res.body["url"], "https://example.com/goto");
        assert_eq!(res.body["likes"], 5);
        assert_eq!(res.body["user"]["username"], "alice");
        assert_eq!(app.blog_count().await, 1);
    }

    #[tokio::test]
    async fn omitted_likes_default_to_zero() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;

        let res = app
            .post_with_token(
                routes::BLOGS,
                &json!({"title": "No likes yet", "url": "https://example.com/none"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 201);
        assert_eq!(res.body["likes"], 0);
    }

    #[tokio::test]
    async fn missing_title_or_url_fails_validation_and_leaves_store_unchanged() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;

        let untitled = app
            .post_with_token(
                routes::BLOGS,
                &json!({"author": "x", "url": "https://example.com/a"}),
                &token,
            )
            .await;
        assert_eq!(untitled.status, 400);
        assert_eq!(untitled.body["code"], "VALIDATION_ERROR");

        let url_less = app
            .post_with_token(routes::BLOGS, &json!({"title": "A", "author": "x"}), &token)
            .await;
        assert_eq!(url_less.status, 400);
        assert_eq!(url_less.body["code"], "VALIDATION_ERROR");

        assert_eq!(app.blog_count().await, 0);
    }

    #[tokio::test]
    async fn negative_likes_fail_validation() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;

        let res = app
            .post_with_token(
                routes::BLOGS,
                &json!({"title": "A", "url": "https://example.com/a", "likes": -1}),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod single_blog {
    use super::*;

    #[tokio::test]
    async fn viewing_is_possible_given_a_valid_id() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;
        let id = app.create_blog(&token, "React patterns", "Michael Chan", 7).await;

        let res = app.get(&routes::blog(id)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["id"], id);
        assert_eq!(res.body["title"], "React patterns");
        assert_eq!(res.body["user"]["username"], "alice");
    }

    #[tokio::test]
    async fn a_valid_but_nonexistent_id_returns_404() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::blog(999_999)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn a_malformed_id_returns_400() {
        let app = TestApp::spawn().await;

        let res = app.get("/api/blogs/not-a-number").await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn updating_likes_returns_204_and_persists() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;
        let id = app.create_blog(&token, "React patterns", "Michael Chan", 7).await;

        let res = app.put(&routes::blog(id), &json!({"likes": 42})).await;
        assert_eq!(res.status, 204);

        let fetched = app.get(&routes::blog(id)).await;
        assert_eq!(fetched.body["likes"], 42);
    }

    #[tokio::test]
    async fn updating_a_missing_blog_returns_404() {
        let app = TestApp::spawn().await;

        let res = app.put(&routes::blog(999_999), &json!({"likes": 1})).await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn updating_to_negative_likes_fails_validation() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;
        let id = app.create_blog(&token, "React patterns", "Michael Chan", 7).await;

        let res = app.put(&routes::blog(id), &json!({"likes": -5})).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod deletion {
    use super::*;

    #[tokio::test]
    async fn the_owner_can_delete_their_blog() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;
        let id = app.create_blog(&token, "Short lived", "alice", 0).await;

        let res = app.delete_with_token(&routes::blog(id), &token).await;

        assert_eq!(res.status, 204);
        assert_eq!(app.blog_count().await, 0);
        assert_eq!(app.get(&routes::blog(id)).await.status, 404);
    }

    #[tokio::test]
    async fn a_non_owner_cannot_delete_and_the_blog_survives() {
        let app = TestApp::spawn().await;
        let owner = app.create_authenticated_user("alice", "securepass").await;
        let intruder = app.create_authenticated_user("mallory", "alsosecure").await;
        let id = app.create_blog(&owner, "Keep out", "alice", 3).await;

        let res = app.delete_with_token(&routes::blog(id), &intruder).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "NOT_BLOG_OWNER");
        assert_eq!(app.blog_count().await, 1);
    }

    #[tokio::test]
    async fn deleting_without_a_token_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;
        let id = app.create_blog(&token, "Keep out", "alice", 3).await;

        let res = app.delete_without_token(&routes::blog(id)).await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
        assert_eq!(app.blog_count().await, 1);
    }

    #[tokio::test]
    async fn deleting_a_missing_blog_returns_404() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;

        let res = app.delete_with_token(&routes::blog(999_999), &token).await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn deleting_a_blog_removes_its_comments() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;
        let id = app.create_blog(&token, "Commented", "alice", 1).await;
        let commented = app
            .post_without_token(&routes::blog_comments(id), &json!({"comment": "nice"}))
            .await;
        assert_eq!(commented.status, 201);

        let res = app.delete_with_token(&routes::blog(id), &token).await;
        assert_eq!(res.status, 204);

        assert_eq!(app.get(&routes::blog_comments(id)).await.status, 404);
    }
}

mod comments {
    use super::*;

    #[tokio::test]
    async fn a_comment_can_be_added_and_listed() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;
        let id = app.create_blog(&token, "React patterns", "Michael Chan", 7).await;

        let created = app
            .post_without_token(&routes::blog_comments(id), &json!({"comment": "Great read!"}))
            .await;
        assert_eq!(created.status, 201);
        assert_eq!(created.body["comment"], "Great read!");
        assert_eq!(created.body["blog_id"], id);

        let listed = app.get(&routes::blog_comments(id)).await;
        assert_eq!(listed.status, 200);
        let comments = listed.body.as_array().expect("array");
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0]["comment"], "Great read!");
    }

    #[tokio::test]
    async fn commenting_on_a_missing_blog_returns_404() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(&routes::blog_comments(999_999), &json!({"comment": "hello?"}))
            .await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn an_empty_comment_fails_validation() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;
        let id = app.create_blog(&token, "React patterns", "Michael Chan", 7).await;

        let res = app
            .post_without_token(&routes::blog_comments(id), &json!({"comment": "   "}))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod stats {
    use super::*;

    #[tokio::test]
    async fn stats_over_an_empty_store_are_all_empty() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::BLOG_STATS).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["total_likes"], 0);
        assert!(res.body["favorite"].is_null());
        assert!(res.body["most_blogs"].is_null());
        assert!(res.body["most_likes"].is_null());
    }

    #[tokio::test]
    async fn stats_aggregate_all_stored_blogs() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;
        app.create_blog(&token, "React patterns", "Michael Chan", 7).await;
        app.create_blog(&token, "Canonical string reduction", "Edsger W. Dijkstra", 12)
            .await;
        app.create_blog(&token, "Go To Statement Considered Harmful", "Edsger W. Dijkstra", 5)
            .await;

        let res = app.get(routes::BLOG_STATS).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["total_likes"], 24);
        assert_eq!(res.body["favorite"]["title"], "Canonical string reduction");
        assert_eq!(res.body["favorite"]["likes"], 12);
        assert_eq!(res.body["most_blogs"]["author"], "Edsger W. Dijkstra");
        assert_eq!(res.body["most_blogs"]["blogs"], 2);
        assert_eq!(res.body["most_likes"]["author"], "Edsger W. Dijkstra");
        assert_eq!(res.body["most_likes"]["likes"], 17);
    }
}
