//! Catalog manager integration tests

use std::sync::Arc;

use config::{Config, File, FileFormat};
use mockall::{mock, Sequence};

use library_catalog::{
    error::{AppError, AppResult},
    models::Book,
    services::{BookObserver, CatalogManager, NotificationService, OutboxNotifier, PatronObserver},
    AppConfig, AppState,
};

mock! {
    pub Notifier {}
    impl NotificationService for Notifier {
        fn notify(&self, recipient_id: &str, message: &str) -> AppResult<()>;
    }
}

mock! {
    pub Observer {}
    impl BookObserver for Observer {
        fn notify_book_added(&self, book: &Book) -> AppResult<()>;
    }
}

fn silent_notifier() -> Arc<MockNotifier> {
    let mut notifier = MockNotifier::new();
    notifier.expect_notify().returning(|_, _| Ok(()));
    Arc::new(notifier)
}

#[test]
fn test_gatsby_loan_round_trip() {
    let mut notifier = MockNotifier::new();
    let mut seq = Sequence::new();
    notifier
        .expect_notify()
        .withf(|recipient: &str, message: &str| {
            recipient == "user01" && message.contains("borrowed") && message.contains("El Gran Gatsby")
        })
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(()));
    notifier
        .expect_notify()
        .withf(|recipient: &str, message: &str| {
            recipient == "user01" && message.contains("returned") && message.contains("123456789")
        })
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(()));

    let mut catalog = CatalogManager::new(Arc::new(notifier));
    let gatsby = catalog.add_book("El Gran Gatsby", "F. Scott Fitzgerald", "123456789");
    catalog.add_book("1984", "George Orwell", "987654321");

    catalog.loan_book("123456789", "user01");
    assert_eq!(catalog.loans().len(), 1);
    assert_eq!(catalog.loans()[0].isbn, "123456789");
    assert_eq!(catalog.loans()[0].borrower_id, "user01");

    catalog.return_book("123456789", "user01");
    assert!(catalog.loans().is_empty());
    assert_eq!(catalog.search_by_isbn("123456789"), Some(&gatsby));
}

#[test]
fn test_observer_called_once_with_new_book() {
    let mut observer = MockObserver::new();
    observer
        .expect_notify_book_added()
        .withf(|book: &Book| {
            book.title() == "1984" && book.author() == "George Orwell" && book.isbn() == "987654321"
        })
        .times(1)
        .returning(|_| Ok(()));

    let mut catalog = CatalogManager::new(silent_notifier());
    catalog.add_observer(Arc::new(observer));
    catalog.add_book("1984", "George Orwell", "987654321");
}

#[test]
fn test_observers_notified_in_registration_order() {
    let mut seq = Sequence::new();
    let mut first = MockObserver::new();
    first
        .expect_notify_book_added()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));
    let mut second = MockObserver::new();
    second
        .expect_notify_book_added()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));

    let mut catalog = CatalogManager::new(silent_notifier());
    catalog.add_observer(Arc::new(first));
    catalog.add_observer(Arc::new(second));
    catalog.add_book("1984", "George Orwell", "987654321");
}

#[test]
fn test_failing_observer_is_isolated() {
    let mut failing = MockObserver::new();
    failing
        .expect_notify_book_added()
        .times(1)
        .returning(|_| Err(AppError::Observer("subscriber offline".to_string())));
    let mut healthy = MockObserver::new();
    healthy.expect_notify_book_added().times(1).returning(|_| Ok(()));

    let mut catalog = CatalogManager::new(silent_notifier());
    catalog.add_observer(Arc::new(failing));
    catalog.add_observer(Arc::new(healthy));
    catalog.add_book("1984", "George Orwell", "987654321");

    assert_eq!(catalog.books().len(), 1);
}

#[test]
fn test_added_book_found_by_title() {
    let mut catalog = CatalogManager::new(silent_notifier());
    catalog.add_book("Animal Farm", "George Orwell", "555");
    let book = catalog.add_book("1984", "George Orwell", "987654321");

    assert!(catalog.search_by_title("1984").contains(&book));
}

#[test]
fn test_remove_absent_isbn_is_noop() {
    let mut catalog = CatalogManager::new(silent_notifier());
    catalog.add_book("1984", "George Orwell", "987654321");
    let before = catalog.books().to_vec();

    assert!(!catalog.remove_book("000000000"));
    assert_eq!(catalog.books(), before.as_slice());

    assert!(catalog.remove_book("987654321"));
    assert!(catalog.search_by_isbn("987654321").is_none());
}

#[test]
fn test_loan_of_unknown_isbn_sends_nothing() {
    let mut notifier = MockNotifier::new();
    notifier.expect_notify().never();

    let mut catalog = CatalogManager::new(Arc::new(notifier));
    catalog.add_book("1984", "George Orwell", "987654321");

    assert!(catalog.loan_book("000000000", "user01").is_none());
    assert!(catalog.loans().is_empty());
}

#[test]
fn test_return_without_loan_is_noop() {
    let mut notifier = MockNotifier::new();
    notifier.expect_notify().never();

    let mut catalog = CatalogManager::new(Arc::new(notifier));
    catalog.add_book("1984", "George Orwell", "987654321");

    assert!(catalog.return_book("987654321", "user01").is_none());
}

#[test]
fn test_loan_survives_failing_notifier() {
    let mut notifier = MockNotifier::new();
    notifier
        .expect_notify()
        .times(1)
        .returning(|_, _| Err(AppError::Notification("smtp down".to_string())));

    let mut catalog = CatalogManager::new(Arc::new(notifier));
    catalog.add_book("1984", "George Orwell", "987654321");

    assert!(catalog.loan_book("987654321", "user01").is_some());
    assert_eq!(catalog.loans_for("user01").len(), 1);
}

#[test]
fn test_loan_then_return_restores_ledger() {
    let mut catalog = CatalogManager::new(silent_notifier());
    catalog.add_book("El Gran Gatsby", "F. Scott Fitzgerald", "123456789");
    catalog.add_book("1984", "George Orwell", "987654321");
    catalog.loan_book("987654321", "user02");
    let before = catalog.loans().to_vec();

    catalog.loan_book("123456789", "user01");
    let closed = catalog.return_book("123456789", "user01").unwrap();

    assert_eq!(closed.borrower_id, "user01");
    assert_eq!(catalog.loans(), before.as_slice());
}

#[test]
fn test_patron_observer_through_shared_state() {
    let outbox = Arc::new(OutboxNotifier::new());
    let state = AppState::new(AppConfig::default(), CatalogManager::new(outbox.clone()));

    state.with_catalog(|catalog| {
        catalog.add_observer(Arc::new(PatronObserver::new("user01", outbox.clone())));
        catalog.add_book("El Gran Gatsby", "F. Scott Fitzgerald", "123456789");
        catalog.loan_book("123456789", "user01");
    });

    let messages: Vec<String> = outbox.drain().into_iter().map(|n| n.message).collect();
    assert_eq!(
        messages,
        vec![
            "New book available: \"El Gran Gatsby\" by F. Scott Fitzgerald".to_string(),
            "You have borrowed the book \"El Gran Gatsby\"".to_string(),
        ]
    );
}

#[test]
fn test_configured_outbox_is_drained_through_state() {
    let config: AppConfig = Config::builder()
        .add_source(File::from_str(
            "[notifications]\nchannel = \"outbox\"\n",
            FileFormat::Toml,
        ))
        .build()
        .unwrap()
        .try_deserialize()
        .unwrap();
    let state = AppState::from_config(config);

    state.with_catalog(|catalog| {
        catalog.add_book("1984", "George Orwell", "987654321");
        catalog.loan_book("987654321", "user01");
        catalog.return_book("987654321", "user01");
    });

    let outbox = state.outbox().expect("outbox channel selected");
    let queued = outbox.drain();
    assert_eq!(queued.len(), 2);
    assert!(queued.iter().all(|n| n.recipient_id == "user01"));
    assert!(queued[1].message.starts_with("You have returned"));
    assert!(outbox.is_empty());
}

#[test]
fn test_console_channel_has_no_outbox() {
    let state = AppState::from_config(AppConfig::default());
    assert!(state.outbox().is_none());
}
