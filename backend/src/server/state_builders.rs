//! Builders wiring repositories and domain services into the HTTP state.
//!
//! With a database pool the Diesel adapters back every port; without one the
//! in-memory stores do, which keeps local development and tests free of
//! external services.

use std::sync::Arc;

use actix_web::web;
use tracing::{debug, info};
use uuid::Uuid;

use backend::domain::ports::{
    BookRepository, ClientRepository, EmployeeRepository, LoanActivityRepository, RepositoryError,
    UserRepository,
};
use backend::domain::{
    CatalogueService, CirculationService, ClientDirectoryService, DashboardService,
    EmployeeDirectoryService, PasswordDigest, PasswordLoginService, StaffRole, UserRecord,
};
use backend::inbound::http::state::HttpState;
use backend::outbound::memory::{
    InMemoryBookRepository, InMemoryClientRepository, InMemoryEmployeeRepository,
    InMemoryLoanActivityRepository, InMemoryUserRepository,
};
use backend::outbound::persistence::{
    DieselBookRepository, DieselClientRepository, DieselEmployeeRepository,
    DieselLoanActivityRepository, DieselUserRepository,
};

use super::config::{AdminSeed, ServerConfig};

/// HTTP state plus the user store kept aside for startup seeding.
pub(super) struct BuiltState {
    pub(super) http_state: web::Data<HttpState>,
    pub(super) users: Arc<dyn UserRepository>,
}

/// Select persistence adapters from the configuration and wire services.
pub(super) fn build_states(config: &ServerConfig) -> BuiltState {
    match &config.db_pool {
        Some(pool) => wire(
            Arc::new(DieselBookRepository::new(pool.clone())),
            Arc::new(DieselClientRepository::new(pool.clone())),
            Arc::new(DieselEmployeeRepository::new(pool.clone())),
            Arc::new(DieselLoanActivityRepository::new(pool.clone())),
            Arc::new(DieselUserRepository::new(pool.clone())),
        ),
        None => wire(
            Arc::new(InMemoryBookRepository::default()),
            Arc::new(InMemoryClientRepository::default()),
            Arc::new(InMemoryEmployeeRepository::default()),
            Arc::new(InMemoryLoanActivityRepository::default()),
            Arc::new(InMemoryUserRepository::default()),
        ),
    }
}

fn wire<B, C, E, A, U>(
    books: Arc<B>,
    clients: Arc<C>,
    employees: Arc<E>,
    activities: Arc<A>,
    users: Arc<U>,
) -> BuiltState
where
    B: BookRepository + 'static,
    C: ClientRepository + 'static,
    E: EmployeeRepository + 'static,
    A: LoanActivityRepository + 'static,
    U: UserRepository + 'static,
{
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
    let login = Arc::new(PasswordLoginService::new(users.clone()));

    let http_state = web::Data::new(HttpState {
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
    });

    BuiltState { http_state, users }
}

/// Create the seeded administrator account unless the username already exists.
///
/// Existing records are left untouched so password changes made through the
/// application survive restarts.
pub(super) async fn seed_admin(
    users: &Arc<dyn UserRepository>,
    seed: &AdminSeed,
) -> Result<(), RepositoryError> {
    if users.find_by_username(&seed.username).await?.is_some() {
        debug!(username = %seed.username, "admin account already present, skipping seed");
        return Ok(());
    }

    let record = UserRecord::new(
        Uuid::new_v4(),
        seed.username.clone(),
        seed.display_name.clone(),
        StaffRole::Admin,
        PasswordDigest::generate(&seed.password),
        true,
    );
    users.upsert(&record).await?;
    info!(username = %seed.username, "seeded administrator account");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use backend::domain::ports::LoginService;
    use backend::domain::{DisplayName, LoginCredentials, Username};
    use rstest::rstest;

    fn test_seed() -> AdminSeed {
        AdminSeed::new(
            Username::new("head.librarian").expect("valid username"),
            DisplayName::new("Head Librarian").expect("valid display name"),
            "opening-hours".to_owned(),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn seeded_admin_can_authenticate() {
        let users: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::default());
        seed_admin(&users, &test_seed()).await.expect("seed");

        let login = PasswordLoginService::new(users.clone());
        let credentials = LoginCredentials::try_from_parts("head.librarian", "opening-hours")
            .expect("credentials shape");
        let user = login.authenticate(&credentials).await.expect("login");
        assert_eq!(user.role, StaffRole::Admin);
    }

    #[rstest]
    #[tokio::test]
    async fn seeding_twice_keeps_the_original_record() {
        let users: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::default());
        let seed = test_seed();
        seed_admin(&users, &seed).await.expect("first seed");
        let original = users
            .find_by_username(&seed.username)
            .await
            .expect("lookup")
            .expect("seeded");

        seed_admin(&users, &seed).await.expect("second seed");
        let unchanged = users
            .find_by_username(&seed.username)
            .await
            .expect("lookup")
            .expect("still present");
        assert_eq!(unchanged.id(), original.id());
    }
}
