use serde_json::json;

use crate::common::{TestApp, TestResponse, routes};

mod login {
    use super::*;

    #[tokio::test]
    async fn valid_credentials_return_a_usable_token() {
        let app = TestApp::spawn().await;
        let reg = app
            .post_without_token(
                routes::USERS,
                &json!({"username": "alice", "name": "Alice Liddell", "password": "securepass"}),
            )
            .await;
        assert_eq!(reg.status, 201, "Registration failed: {}", reg.text);

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"username": "alice", "password": "securepass"}),
            )
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["username"], "alice");
        assert_eq!(res.body["name"], "Alice Liddell");
        let token = res.body["token"].as_str().expect("token should be a string");

        // The token actually authenticates a mutating request.
        let created = app
            .post_with_token(
                routes::BLOGS,
                &json!({"title": "First post", "url": "https://example.com/first"}),
                token,
            )
            .await;
        assert_eq!(created.status, 201, "Token was not usable: {}", created.text);
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let app = TestApp::spawn().await;
        app.create_authenticated_user("alice", "securepass").await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"username": "alice", "password": "wrongpass"}),
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "INVALID_CREDENTIALS");
    }

    #[tokio::test]
    async fn unknown_username_fails_the_same_way_as_a_wrong_password() {
        let app = TestApp::spawn().await;
        app.create_authenticated_user("alice", "securepass").await;

        let wrong_password = app
            .post_without_token(
                routes::LOGIN,
                &json!({"username": "alice", "password": "wrongpass"}),
            )
            .await;
        let unknown_user = app
            .post_without_token(
                routes::LOGIN,
                &json!({"username": "nobody", "password": "securepass"}),
            )
            .await;

        // Identical generic failure, so callers cannot probe for usernames.
        assert_eq!(wrong_password.status, 401);
        assert_eq!(unknown_user.status, 401);
        assert_eq!(wrong_password.body, unknown_user.body);
        assert_eq!(unknown_user.body["code"], "INVALID_CREDENTIALS");
    }

    #[tokio::test]
    async fn empty_username_or_password_is_rejected_as_bad_credentials() {
        let app = TestApp::spawn().await;
        app.create_authenticated_user("alice", "securepass").await;

        let empty_username = app
            .post_without_token(routes::LOGIN, &json!({"username": "", "password": "securepass"}))
            .await;
        let empty_password = app
            .post_without_token(routes::LOGIN, &json!({"username": "alice", "password": ""}))
            .await;

        assert_eq!(empty_username.status, 401);
        assert_eq!(empty_password.status, 401);
    }
}

mod bearer_tokens {
    use super::*;

    #[tokio::test]
    async fn request_without_token_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::BLOGS,
                &json!({"title": "A", "url": "https://example.com/a"}),
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
    }

    #[tokio::test]
    async fn request_with_malformed_token_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post_with_token(
                routes::BLOGS,
                &json!({"title": "A", "url": "https://example.com/a"}),
                "not-a-valid-jwt",
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
    }

    #[tokio::test]
    async fn request_with_non_bearer_auth_scheme_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .client
            .post(format!("http://{}{}", app.addr, routes::BLOGS))
            .header("Authorization", "Basic abc123")
            .json(&json!({"title": "A", "url": "https://example.com/a"}))
            .send()
            .await
            .expect("Failed to send request");

        let res = TestResponse::from_response(res).await;
        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
    }

    #[tokio::test]
    async fn token_signed_with_a_different_secret_is_rejected() {
        let app = TestApp::spawn().await;

        let forged = server::utils::jwt::sign(1, "alice", "attacker-secret")
            .expect("signing with an arbitrary secret should work");
        let res = app
            .post_with_token(
                routes::BLOGS,
                &json!({"title": "A", "url": "https://example.com/a"}),
                &forged,
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
    }
}
