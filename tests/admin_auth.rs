use faculty_directory_manager::db::{AuthProvider, SqliteStore};

#[test]
fn first_sign_in_registers_the_admin_account() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    assert!(store.needs_bootstrap().unwrap());
    assert!(!store.is_admin());

    let session = store.sign_in("Admin@School.ru ", "секрет123").unwrap();
    assert_eq!(session.email, "admin@school.ru");
    assert!(store.is_admin());
    assert!(!store.needs_bootstrap().unwrap());
}

#[test]
fn wrong_password_is_rejected_after_bootstrap() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    store.sign_in("admin@school.ru", "секрет123").unwrap();
    store.sign_out();

    let err = store.sign_in("admin@school.ru", "другой").unwrap_err();
    assert_eq!(err.to_string(), "Invalid email or password.");
    assert!(!store.is_admin());
}

#[test]
fn unknown_email_is_rejected_after_bootstrap() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    store.sign_in("admin@school.ru", "секрет123").unwrap();
    store.sign_out();

    assert!(store.sign_in("other@school.ru", "секрет123").is_err());
}

#[test]
fn sign_out_clears_the_session() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    store.sign_in("admin@school.ru", "секрет123").unwrap();
    assert!(store.session().is_some());

    store.sign_out();
    assert!(store.session().is_none());
    assert!(!store.is_admin());
}

#[test]
fn matching_credentials_sign_in_again() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    store.sign_in("admin@school.ru", "секрет123").unwrap();
    store.sign_out();

    let session = store.sign_in("ADMIN@school.ru", "секрет123").unwrap();
    assert_eq!(session.email, "admin@school.ru");
}
