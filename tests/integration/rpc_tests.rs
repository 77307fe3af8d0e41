//! gRPC service tests, calling the service trait directly

use tonic::{Code, Request};

use libris_server::rpc::{
    library_service_server::LibraryService,
    messages::{
        Book, BorrowBookRequest, CheckBookAvailabilityRequest, CreateBookRequest, GetBookRequest,
        ListBooksRequest, LoginUserRequest, RegisterUserRequest, ReturnBookRequest,
    },
    LibraryRpc,
};

use crate::memory_state;

fn rpc() -> LibraryRpc {
    LibraryRpc::new(memory_state())
}

async fn register(rpc: &LibraryRpc, email: &str) -> String {
    rpc.register_user(Request::new(RegisterUserRequest {
        name: "Ann".to_string(),
        email: email.to_string(),
        password: "password123".to_string(),
    }))
    .await
    .unwrap()
    .into_inner()
    .user
    .unwrap()
    .id
}

async fn create(rpc: &LibraryRpc, title: &str, isbn: &str) -> Book {
    rpc.create_book(Request::new(CreateBookRequest {
        book: Some(Book {
            title: title.to_string(),
            author: "Bar".to_string(),
            isbn: isbn.to_string(),
            ..Default::default()
        }),
    }))
    .await
    .unwrap()
    .into_inner()
    .book
    .unwrap()
}

async fn is_available(rpc: &LibraryRpc, id: &str) -> bool {
    rpc.get_book(Request::new(GetBookRequest { id: id.to_string() }))
        .await
        .unwrap()
        .into_inner()
        .book
        .unwrap()
        .available
}

#[tokio::test]
async fn test_end_to_end_scenario() {
    let rpc = rpc();
    let user_id = register(&rpc, "ann@x.com").await;

    let login = rpc
        .login_user(Request::new(LoginUserRequest {
            email: "ann@x.com".to_string(),
            password: "password123".to_string(),
        }))
        .await
        .unwrap()
        .into_inner();
    assert_eq!(login.user.unwrap().id, user_id);
    assert_eq!(login.token, "sample-jwt-token");

    let book = create(&rpc, "Foo", "111").await;
    assert!(book.available);
    assert_eq!(book.isbn, "111");

    let borrow = rpc
        .borrow_book(Request::new(BorrowBookRequest {
            user_id: user_id.clone(),
            book_id: book.id.clone(),
        }))
        .await
        .unwrap()
        .into_inner();
    assert!(!borrow.borrow_id.is_empty());
    let due = chrono::DateTime::parse_from_rfc3339(&borrow.due_date).unwrap();
    let lead = due.with_timezone(&chrono::Utc) - chrono::Utc::now();
    assert!(lead > chrono::Duration::days(13));

    assert!(!is_available(&rpc, &book.id).await);
    let availability = rpc
        .check_book_availability(Request::new(CheckBookAvailabilityRequest {
            book_id: book.id.clone(),
        }))
        .await
        .unwrap()
        .into_inner();
    assert!(!availability.available);
    assert_eq!(availability.status, "Borrowed");

    let returned = rpc
        .return_book(Request::new(ReturnBookRequest {
            borrow_id: borrow.borrow_id,
        }))
        .await
        .unwrap()
        .into_inner();
    assert!(returned.success);
    assert!(is_available(&rpc, &book.id).await);
}

#[tokio::test]
async fn test_status_codes() {
    let rpc = rpc();

    let err = rpc
        .register_user(Request::new(RegisterUserRequest {
            name: "Ann".to_string(),
            email: "ann@x.com".to_string(),
            password: "short".to_string(),
        }))
        .await
        .unwrap_err();
    assert_eq!(err.code(), Code::InvalidArgument);

    let user_id = register(&rpc, "ann@x.com").await;
    let err = rpc
        .register_user(Request::new(RegisterUserRequest {
            name: "Ann".to_string(),
            email: "ann@x.com".to_string(),
            password: "password123".to_string(),
        }))
        .await
        .unwrap_err();
    assert_eq!(err.code(), Code::AlreadyExists);

    let err = rpc
        .login_user(Request::new(LoginUserRequest {
            email: "ann@x.com".to_string(),
            password: "wrongpassword".to_string(),
        }))
        .await
        .unwrap_err();
    assert_eq!(err.code(), Code::Unauthenticated);

    let err = rpc
        .get_book(Request::new(GetBookRequest {
            id: "book-123".to_string(),
        }))
        .await
        .unwrap_err();
    assert_eq!(err.code(), Code::NotFound);

    let err = rpc
        .create_book(Request::new(CreateBookRequest { book: None }))
        .await
        .unwrap_err();
    assert_eq!(err.code(), Code::InvalidArgument);

    let book = create(&rpc, "Foo", "111").await;
    let borrow = BorrowBookRequest {
        user_id,
        book_id: book.id,
    };
    rpc.borrow_book(Request::new(borrow.clone())).await.unwrap();
    let err = rpc.borrow_book(Request::new(borrow)).await.unwrap_err();
    assert_eq!(err.code(), Code::FailedPrecondition);

    let err = rpc
        .return_book(Request::new(ReturnBookRequest {
            borrow_id: String::new(),
        }))
        .await
        .unwrap_err();
    assert_eq!(err.code(), Code::InvalidArgument);
}

#[tokio::test]
async fn test_list_books_defaults() {
    let rpc = rpc();
    for (title, isbn) in [("Bravo", "2"), ("Alpha", "1")] {
        create(&rpc, title, isbn).await;
    }
    // books without an ISBN do not collide
    create(&rpc, "Charlie", "").await;
    create(&rpc, "Delta", "").await;

    let page = rpc
        .list_books(Request::new(ListBooksRequest::default()))
        .await
        .unwrap()
        .into_inner();
    assert_eq!(page.page, 1);
    assert_eq!(page.page_size, 10);
    let titles: Vec<String> = page.books.into_iter().map(|b| b.title).collect();
    assert_eq!(titles, ["Alpha", "Bravo", "Charlie", "Delta"]);

    let page = rpc
        .list_books(Request::new(ListBooksRequest {
            page_size: 3,
            page: 2,
        }))
        .await
        .unwrap()
        .into_inner();
    assert_eq!(page.books.len(), 1);
    assert_eq!(page.books[0].title, "Delta");
}
