mod common;

use axum::http::StatusCode;
use axum_test::{TestServer, TestServerConfig};
use tempfile::TempDir;

async fn server() -> (TempDir, TestServer) {
	let (dir, state) = common::test_state().await;

	let config = TestServerConfig {
		save_cookies: true,
		..TestServerConfig::default()
	};
	let server =
		TestServer::new_with_config(inkpost::app(state), config).expect("failed to start server");

	(dir, server)
}

fn register_form(username: &str, email: &str, password: &str, confirm: &str) -> Vec<(&'static str, String)> {
	vec![
		("username", username.to_string()),
		("email", email.to_string()),
		("password", password.to_string()),
		("confirmPassword", confirm.to_string()),
	]
}

#[tokio::test]
async fn health_is_reachable_without_a_session() {
	let (_dir, server) = server().await;

	let response = server.get("/health").await;

	assert_eq!(response.status_code(), StatusCode::OK);
	assert_eq!(response.text(), "ok");
}

#[tokio::test]
async fn anonymous_visitors_are_redirected_to_login() {
	let (_dir, server) = server().await;

	let response = server.get("/").await;

	assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
	assert_eq!(response.header("location"), "/login");
}

#[tokio::test]
async fn login_and_register_pages_are_public() {
	let (_dir, server) = server().await;

	assert_eq!(server.get("/login").await.status_code(), StatusCode::OK);
	assert_eq!(server.get("/register").await.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn registration_implies_login() {
	let (_dir, server) = server().await;

	let response = server
		.post("/register")
		.form(&register_form("alice", "alice@x.com", "pw1", "pw1"))
		.await;

	assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
	assert_eq!(response.header("location"), "/");

	// The saved session cookie authenticates the next request.
	let home = server.get("/").await;
	assert_eq!(home.status_code(), StatusCode::OK);
	assert!(home.text().contains("alice"));
}

#[tokio::test]
async fn duplicate_email_is_rejected_with_a_message() {
	let (_dir, server) = server().await;

	server
		.post("/register")
		.form(&register_form("alice", "alice@x.com", "pw1", "pw1"))
		.await;

	let response = server
		.post("/register")
		.form(&register_form("someone-else", "alice@x.com", "other-pw", "other-pw"))
		.await;

	assert_eq!(response.status_code(), StatusCode::CONFLICT);
	assert!(response.text().contains("email already taken"));
}

#[tokio::test]
async fn mismatched_passwords_are_rejected_before_storage() {
	let (_dir, server) = server().await;

	let response = server
		.post("/register")
		.form(&register_form("alice", "alice@x.com", "pw1", "pw2"))
		.await;

	assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
	assert!(response.text().contains("passwords do not match"));
}

#[tokio::test]
async fn login_accepts_only_the_right_password() {
	let (_dir, server) = server().await;

	server
		.post("/register")
		.form(&register_form("alice", "alice@x.com", "pw1", "pw1"))
		.await;
	server.get("/logout").await;

	let wrong = server
		.post("/login")
		.form(&[("email", "alice@x.com"), ("password", "wrong")])
		.await;
	assert_eq!(wrong.status_code(), StatusCode::UNAUTHORIZED);
	assert!(wrong.text().contains("invalid email or password"));

	// An unknown email gets the identical message; the form cannot be
	// used to probe for accounts.
	let unknown = server
		.post("/login")
		.form(&[("email", "nobody@x.com"), ("password", "wrong")])
		.await;
	assert_eq!(unknown.status_code(), StatusCode::UNAUTHORIZED);
	assert!(unknown.text().contains("invalid email or password"));

	let right = server
		.post("/login")
		.form(&[("email", "alice@x.com"), ("password", "pw1")])
		.await;
	assert_eq!(right.status_code(), StatusCode::SEE_OTHER);
	assert_eq!(right.header("location"), "/");

	assert_eq!(server.get("/").await.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn login_with_a_dead_cookie_keeps_the_fresh_session() {
	let (_dir, state) = common::test_state().await;
	let config = TestServerConfig {
		save_cookies: true,
		..TestServerConfig::default()
	};
	let server = TestServer::new_with_config(inkpost::app(state.clone()), config)
		.expect("failed to start server");

	server
		.post("/register")
		.form(&register_form("alice", "alice@x.com", "pw1", "pw1"))
		.await;

	// Invalidate the session server-side; the client still holds the token.
	sqlx::query("DELETE FROM sessions")
		.execute(&state.database)
		.await
		.unwrap();

	let login = server
		.post("/login")
		.form(&[("email", "alice@x.com"), ("password", "pw1")])
		.await;
	assert_eq!(login.status_code(), StatusCode::SEE_OTHER);

	// The dead token must not clear the session login just minted.
	let home = server.get("/").await;
	assert_eq!(home.status_code(), StatusCode::OK);
	assert!(home.text().contains("alice"));
}

#[tokio::test]
async fn logout_destroys_the_session() {
	let (_dir, server) = server().await;

	server
		.post("/register")
		.form(&register_form("alice", "alice@x.com", "pw1", "pw1"))
		.await;
	assert_eq!(server.get("/").await.status_code(), StatusCode::OK);

	let response = server.get("/logout").await;
	assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
	assert_eq!(response.header("location"), "/login");

	// Back to anonymous.
	assert_eq!(server.get("/").await.status_code(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn unknown_routes_render_an_error_page_when_authenticated() {
	let (_dir, server) = server().await;

	server
		.post("/register")
		.form(&register_form("alice", "alice@x.com", "pw1", "pw1"))
		.await;

	let response = server.get("/no-such-page").await;
	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
