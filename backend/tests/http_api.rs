//! End-to-end behaviour tests for the REST API over in-memory stores.
//!
//! Each scenario stands up the full actix application with session
//! middleware and exercises login, catalogue management, circulation, the
//! registers, and the dashboard through HTTP.

use std::sync::Arc;

use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::{Value, json};
use uuid::Uuid;

use backend::TRACE_ID_HEADER;
use backend::domain::ports::UserRepository;
use backend::domain::{
    CatalogueService, CirculationService, ClientDirectoryService, DashboardService,
    DisplayName, EmployeeDirectoryService, PasswordDigest, PasswordLoginService, StaffRole,
    UserRecord, Username,
};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::{activities, books, clients, dashboard, employees, users};
use backend::middleware::Trace;
use backend::outbound::memory::{
    InMemoryBookRepository, InMemoryClientRepository, InMemoryEmployeeRepository,
    InMemoryLoanActivityRepository, InMemoryUserRepository,
};

const ADMIN_PASSWORD: &str = "card-catalogue";
const STAFF_PASSWORD: &str = "returns-desk";

async fn seed_user(store: &InMemoryUserRepository, name: &str, password: &str, role: StaffRole) {
    let record = UserRecord::new(
        Uuid::new_v4(),
        Username::new(name).expect("valid username"),
        DisplayName::new("Test Librarian").expect("valid display name"),
        role,
        PasswordDigest::generate(password),
        true,
    );
    store.upsert(&record).await.expect("seed user");
}

fn build_state(user_store: Arc<InMemoryUserRepository>) -> web::Data<HttpState> {
    let books = Arc::new(InMemoryBookRepository::default());
    let clients = Arc::new(InMemoryClientRepository::default());
    let employees = Arc::new(InMemoryEmployeeRepository::default());
    let activities = Arc::new(InMemoryLoanActivityRepository::default());

    let catalogue = Arc::new(CatalogueService::new(books.clone(), activities.clone()));
    let circulation = Arc::new(CirculationService::new(
        books.clone(),
        clients.clone(),
        activities.clone(),
    ));
    let client_directory = Arc::new(ClientDirectoryService::new(
        clients.clone(),
        books.clone(),
        activities.clone(),
    ));
    let employee_directory = Arc::new(EmployeeDirectoryService::new(employees.clone()));
    let dashboard = Arc::new(DashboardService::new(books, clients, employees, activities));
    let login = Arc::new(PasswordLoginService::new(user_store));

    web::Data::new(HttpState {
        login,
        catalogue: catalogue.clone(),
        catalogue_query: catalogue,
        circulation: circulation.clone(),
        circulation_query: circulation,
        clients: client_directory.clone(),
        clients_query: client_directory,
        employees: employee_directory.clone(),
        employees_query: employee_directory,
        dashboard,
    })
}

async fn spawn_app(
    user_store: Arc<InMemoryUserRepository>,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    let state = build_state(user_store);
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".into())
        .cookie_secure(false)
        .build();

    test::init_service(
        App::new()
            .app_data(state)
            .wrap(Trace)
            .service(
                web::scope("/api/v1")
                    .wrap(session)
                    .service(users::login)
                    .service(users::logout)
                    .service(users::me)
                    .service(books::list_books)
                    .service(books::create_book)
                    .service(books::get_book)
                    .service(books::update_book)
                    .service(books::delete_book)
                    .service(books::loan_book)
                    .service(books::return_book)
                    .service(clients::list_clients)
                    .service(clients::create_client)
                    .service(clients::get_client)
                    .service(clients::update_client)
                    .service(clients::delete_client)
                    .service(employees::list_employees)
                    .service(employees::create_employee)
                    .service(employees::get_employee)
                    .service(employees::update_employee)
                    .service(employees::delete_employee)
                    .service(activities::list_activities)
                    .service(dashboard::summary),
            ),
    )
    .await
}

async fn login<S>(app: &S, username: &str, password: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({"username": username, "password": password}))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK, "login should succeed");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}

async fn post_json<S>(app: &S, cookie: &Cookie<'static>, uri: &str, body: Value) -> ServiceResponse
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    test::call_service(
        app,
        test::TestRequest::post()
            .uri(uri)
            .cookie(cookie.clone())
            .set_json(body)
            .to_request(),
    )
    .await
}

async fn get<S>(app: &S, cookie: &Cookie<'static>, uri: &str) -> ServiceResponse
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    test::call_service(
        app,
        test::TestRequest::get()
            .uri(uri)
            .cookie(cookie.clone())
            .to_request(),
    )
    .await
}

async fn admin_app() -> (
    impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    Cookie<'static>,
) {
    let user_store = Arc::new(InMemoryUserRepository::default());
    seed_user(&user_store, "head.librarian", ADMIN_PASSWORD, StaffRole::Admin).await;
    let app = spawn_app(user_store).await;
    let cookie = login(&app, "head.librarian", ADMIN_PASSWORD).await;
    (app, cookie)
}

#[actix_web::test]
async fn login_rejects_bad_credentials_without_detail() {
    let user_store = Arc::new(InMemoryUserRepository::default());
    seed_user(&user_store, "head.librarian", ADMIN_PASSWORD, StaffRole::Admin).await;
    let app = spawn_app(user_store).await;

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({"username": "head.librarian", "password": "wrong"}))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["message"], "invalid credentials");
}

#[actix_web::test]
async fn login_round_trip_exposes_the_current_user() {
    let (app, cookie) = admin_app().await;

    let response = get(&app, &cookie, "/api/v1/me").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["displayName"], "Test Librarian");
    assert_eq!(body["role"], "admin");
}

#[actix_web::test]
async fn logout_invalidates_the_session() {
    let (app, cookie) = admin_app().await;

    let logout = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/logout")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(logout.status(), StatusCode::NO_CONTENT);
    let cleared = logout
        .response()
        .cookies()
        .find(|c| c.name() == "session")
        .expect("purged session cookie");

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/me")
            .cookie(cleared.into_owned())
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn unauthenticated_requests_get_401_with_trace_id() {
    let app = spawn_app(Arc::new(InMemoryUserRepository::default())).await;

    let response = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/books").to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(
        response.headers().contains_key(TRACE_ID_HEADER),
        "error responses carry a trace id"
    );
}

#[actix_web::test]
async fn book_crud_round_trip() {
    let (app, cookie) = admin_app().await;

    let created = post_json(
        &app,
        &cookie,
        "/api/v1/books",
        json!({
            "title": "Parable of the Sower",
            "author": "Octavia E. Butler",
            "category": "Science Fiction",
            "publicationYear": 1993
        }),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let book: Value = test::read_body_json(created).await;
    assert_eq!(book["status"], "available");
    let id = book["id"].as_str().expect("book id").to_owned();

    let updated = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/v1/books/{id}"))
            .cookie(cookie.clone())
            .set_json(json!({
                "title": "Parable of the Talents",
                "author": "Octavia E. Butler",
                "category": "Science Fiction",
                "publicationYear": 1998
            }))
            .to_request(),
    )
    .await;
    assert_eq!(updated.status(), StatusCode::OK);
    let updated: Value = test::read_body_json(updated).await;
    assert_eq!(updated["title"], "Parable of the Talents");
    assert_eq!(updated["status"], "available");

    let deleted = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/v1/books/{id}"))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let missing = get(&app, &cookie, &format!("/api/v1/books/{id}")).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn invalid_book_payload_reports_the_reason() {
    let (app, cookie) = admin_app().await;

    let response = post_json(
        &app,
        &cookie,
        "/api/v1/books",
        json!({"title": "  ", "author": "Anonymous", "category": "Folklore"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
}

#[actix_web::test]
async fn malformed_book_id_is_a_bad_request() {
    let (app, cookie) = admin_app().await;

    let response = get(&app, &cookie, "/api/v1/books/not-a-uuid").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["details"]["code"], "invalid_uuid");
}

#[actix_web::test]
async fn book_search_filters_by_substring() {
    let (app, cookie) = admin_app().await;

    for (title, author) in [
        ("The Dispossessed", "Ursula K. Le Guin"),
        ("Kindred", "Octavia E. Butler"),
    ] {
        let response = post_json(
            &app,
            &cookie,
            "/api/v1/books",
            json!({"title": title, "author": author, "category": "Science Fiction"}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get(&app, &cookie, "/api/v1/books?search=butler").await;
    assert_eq!(response.status(), StatusCode::OK);
    let page: Value = test::read_body_json(response).await;
    let items = page["items"].as_array().expect("items array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Kindred");
}

#[actix_web::test]
async fn loan_and_return_flow_records_activities() {
    let (app, cookie) = admin_app().await;

    let book: Value = test::read_body_json(
        post_json(
            &app,
            &cookie,
            "/api/v1/books",
            json!({"title": "Dawn", "author": "Octavia E. Butler", "category": "Science Fiction"}),
        )
        .await,
    )
    .await;
    let client: Value = test::read_body_json(
        post_json(
            &app,
            &cookie,
            "/api/v1/clients",
            json!({"fullName": "Mary Shelley", "email": "mary@example.com"}),
        )
        .await,
    )
    .await;
    let book_id = book["id"].as_str().expect("book id").to_owned();
    let client_id = client["id"].as_str().expect("client id").to_owned();

    let loaned = post_json(
        &app,
        &cookie,
        &format!("/api/v1/books/{book_id}/loan"),
        json!({"clientId": client_id}),
    )
    .await;
    assert_eq!(loaned.status(), StatusCode::CREATED);
    let activity: Value = test::read_body_json(loaned).await;
    assert_eq!(activity["action"], "loaned");
    assert_eq!(activity["bookTitle"], "Dawn");
    assert_eq!(activity["clientName"], "Mary Shelley");

    // A second loan of the same copy conflicts.
    let again = post_json(
        &app,
        &cookie,
        &format!("/api/v1/books/{book_id}/loan"),
        json!({"clientId": client_id}),
    )
    .await;
    assert_eq!(again.status(), StatusCode::CONFLICT);

    let returned = post_json(&app, &cookie, &format!("/api/v1/books/{book_id}/return"), json!({}))
        .await;
    assert_eq!(returned.status(), StatusCode::CREATED);

    let history = get(
        &app,
        &cookie,
        &format!("/api/v1/activities?bookId={book_id}"),
    )
    .await;
    assert_eq!(history.status(), StatusCode::OK);
    let page: Value = test::read_body_json(history).await;
    let entries = page["items"].as_array().expect("activity page");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["action"], "returned");
    assert_eq!(entries[1]["action"], "loaned");
}

#[actix_web::test]
async fn deleting_a_loaned_book_conflicts() {
    let (app, cookie) = admin_app().await;

    let book: Value = test::read_body_json(
        post_json(
            &app,
            &cookie,
            "/api/v1/books",
            json!({"title": "Beloved", "author": "Toni Morrison", "category": "Fiction"}),
        )
        .await,
    )
    .await;
    let client: Value = test::read_body_json(
        post_json(
            &app,
            &cookie,
            "/api/v1/clients",
            json!({"fullName": "James Baldwin", "email": "james@example.com"}),
        )
        .await,
    )
    .await;
    let book_id = book["id"].as_str().expect("book id").to_owned();
    let client_id = client["id"].as_str().expect("client id");

    let loaned = post_json(
        &app,
        &cookie,
        &format!("/api/v1/books/{book_id}/loan"),
        json!({"clientId": client_id}),
    )
    .await;
    assert_eq!(loaned.status(), StatusCode::CREATED);

    let deleted = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/v1/books/{book_id}"))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn staff_cannot_reach_the_employee_register() {
    let user_store = Arc::new(InMemoryUserRepository::default());
    seed_user(&user_store, "front.desk", STAFF_PASSWORD, StaffRole::Staff).await;
    let app = spawn_app(user_store).await;
    let cookie = login(&app, "front.desk", STAFF_PASSWORD).await;

    let response = get(&app, &cookie, "/api/v1/employees").await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // But board staff still manage the catalogue.
    let created = post_json(
        &app,
        &cookie,
        "/api/v1/books",
        json!({"title": "Orlando", "author": "Virginia Woolf", "category": "Fiction"}),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn admin_manages_the_employee_register() {
    let (app, cookie) = admin_app().await;

    let created = post_json(
        &app,
        &cookie,
        "/api/v1/employees",
        json!({"fullName": "Dorothy Porter", "email": "dorothy@example.com", "role": "staff"}),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let employee: Value = test::read_body_json(created).await;
    assert_eq!(employee["role"], "staff");
    let id = employee["id"].as_str().expect("employee id").to_owned();

    let promoted = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/v1/employees/{id}"))
            .cookie(cookie.clone())
            .set_json(json!({
                "fullName": "Dorothy Porter",
                "email": "dorothy@example.com",
                "role": "admin"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(promoted.status(), StatusCode::OK);
    let promoted: Value = test::read_body_json(promoted).await;
    assert_eq!(promoted["role"], "admin");

    let rejected = post_json(
        &app,
        &cookie,
        "/api/v1/employees",
        json!({"fullName": "Nobody", "email": "nobody@example.com", "role": "director"}),
    )
    .await;
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn deleting_a_client_with_a_loan_conflicts_then_succeeds_after_return() {
    let (app, cookie) = admin_app().await;

    let book: Value = test::read_body_json(
        post_json(
            &app,
            &cookie,
            "/api/v1/books",
            json!({"title": "Sula", "author": "Toni Morrison", "category": "Fiction"}),
        )
        .await,
    )
    .await;
    let client: Value = test::read_body_json(
        post_json(
            &app,
            &cookie,
            "/api/v1/clients",
            json!({"fullName": "Zora Hurston", "email": "zora@example.com"}),
        )
        .await,
    )
    .await;
    let book_id = book["id"].as_str().expect("book id").to_owned();
    let client_id = client["id"].as_str().expect("client id").to_owned();

    post_json(
        &app,
        &cookie,
        &format!("/api/v1/books/{book_id}/loan"),
        json!({"clientId": client_id}),
    )
    .await;

    let blocked = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/v1/clients/{client_id}"))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(blocked.status(), StatusCode::CONFLICT);

    post_json(&app, &cookie, &format!("/api/v1/books/{book_id}/return"), json!({})).await;

    let deleted = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/v1/clients/{client_id}"))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    // Cascade removed the client's activity history.
    let history = get(
        &app,
        &cookie,
        &format!("/api/v1/activities?clientId={client_id}"),
    )
    .await;
    let page: Value = test::read_body_json(history).await;
    assert_eq!(page["items"].as_array().expect("activity page").len(), 0);
}

#[actix_web::test]
async fn dashboard_reflects_collection_state() {
    let (app, cookie) = admin_app().await;

    let book: Value = test::read_body_json(
        post_json(
            &app,
            &cookie,
            "/api/v1/books",
            json!({"title": "Passing", "author": "Nella Larsen", "category": "Fiction"}),
        )
        .await,
    )
    .await;
    post_json(
        &app,
        &cookie,
        "/api/v1/books",
        json!({"title": "Quicksand", "author": "Nella Larsen", "category": "Fiction"}),
    )
    .await;
    let client: Value = test::read_body_json(
        post_json(
            &app,
            &cookie,
            "/api/v1/clients",
            json!({"fullName": "Alain Locke", "email": "alain@example.com"}),
        )
        .await,
    )
    .await;
    let book_id = book["id"].as_str().expect("book id").to_owned();
    let client_id = client["id"].as_str().expect("client id");
    post_json(
        &app,
        &cookie,
        &format!("/api/v1/books/{book_id}/loan"),
        json!({"clientId": client_id}),
    )
    .await;

    let response = get(&app, &cookie, "/api/v1/dashboard").await;
    assert_eq!(response.status(), StatusCode::OK);
    let summary: Value = test::read_body_json(response).await;
    assert_eq!(summary["totalBooks"], 2);
    assert_eq!(summary["availableBooks"], 1);
    assert_eq!(summary["loanedBooks"], 1);
    assert_eq!(summary["totalClients"], 1);
    assert_eq!(summary["recentActivity"].as_array().expect("activity").len(), 1);
}
