//! gRPC service implementation

use tonic::{Request, Response, Status};

use crate::{
    error::AppError,
    models::{book::BookQuery, user::RegisterUser},
    AppState,
};

use super::{
    library_service_server::LibraryService,
    messages::{
        BorrowBookRequest, BorrowBookResponse, CheckBookAvailabilityRequest,
        CheckBookAvailabilityResponse, CreateBookRequest, CreateBookResponse, GetBookRequest,
        GetBookResponse, ListBooksRequest, ListBooksResponse, LoginUserRequest, LoginUserResponse,
        RegisterUserRequest, RegisterUserResponse, ReturnBookRequest, ReturnBookResponse,
    },
};

/// `LibraryService` backed by the shared application services
pub struct LibraryRpc {
    state: AppState,
}

impl LibraryRpc {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

#[tonic::async_trait]
impl LibraryService for LibraryRpc {
    async fn register_user(
        &self,
        request: Request<RegisterUserRequest>,
    ) -> Result<Response<RegisterUserResponse>, Status> {
        let req = request.into_inner();

        let user = self
            .state
            .services
            .users
            .register(RegisterUser {
                name: req.name,
                email: req.email,
                password: req.password,
            })
            .await?;

        Ok(Response::new(RegisterUserResponse {
            user: Some(user.into()),
        }))
    }

    async fn login_user(
        &self,
        request: Request<LoginUserRequest>,
    ) -> Result<Response<LoginUserResponse>, Status> {
        let req = request.into_inner();

        let (user, token) = self
            .state
            .services
            .users
            .login(&req.email, &req.password)
            .await?;

        Ok(Response::new(LoginUserResponse {
            user: Some(user.into()),
            token,
        }))
    }

    async fn create_book(
        &self,
        request: Request<CreateBookRequest>,
    ) -> Result<Response<CreateBookResponse>, Status> {
        let book = request
            .into_inner()
            .book
            .ok_or_else(|| AppError::Validation("book is required".to_string()))?;

        let created = self.state.services.catalog.create_book(book.into()).await?;

        Ok(Response::new(CreateBookResponse {
            book: Some(created.into()),
        }))
    }

    async fn get_book(
        &self,
        request: Request<GetBookRequest>,
    ) -> Result<Response<GetBookResponse>, Status> {
        let req = request.into_inner();
        let book = self.state.services.catalog.get_book(&req.id).await?;

        Ok(Response::new(GetBookResponse {
            book: Some(book.into()),
        }))
    }

    async fn list_books(
        &self,
        request: Request<ListBooksRequest>,
    ) -> Result<Response<ListBooksResponse>, Status> {
        let req = request.into_inner();
        let query = BookQuery {
            page: Some(i64::from(req.page)),
            page_size: Some(i64::from(req.page_size)),
        };

        let page = self.state.services.catalog.list_books(&query).await?;

        Ok(Response::new(ListBooksResponse {
            books: page.books.into_iter().map(Into::into).collect(),
            // bounded by MAX_PAGE_SIZE and the requested i32 page
            page: page.page as i32,
            page_size: page.page_size as i32,
        }))
    }

    async fn borrow_book(
        &self,
        request: Request<BorrowBookRequest>,
    ) -> Result<Response<BorrowBookResponse>, Status> {
        let req = request.into_inner();

        let receipt = self
            .state
            .services
            .loans
            .borrow_book(&req.user_id, &req.book_id)
            .await?;

        Ok(Response::new(BorrowBookResponse {
            borrow_id: receipt.borrow_id.to_string(),
            due_date: receipt.due_date.to_rfc3339(),
        }))
    }

    async fn return_book(
        &self,
        request: Request<ReturnBookRequest>,
    ) -> Result<Response<ReturnBookResponse>, Status> {
        let req = request.into_inner();
        self.state.services.loans.return_book(&req.borrow_id).await?;

        Ok(Response::new(ReturnBookResponse { success: true }))
    }

    async fn check_book_availability(
        &self,
        request: Request<CheckBookAvailabilityRequest>,
    ) -> Result<Response<CheckBookAvailabilityResponse>, Status> {
        let req = request.into_inner();

        let (available, status) = self
            .state
            .services
            .catalog
            .check_availability(&req.book_id)
            .await?;

        Ok(Response::new(CheckBookAvailabilityResponse {
            available,
            status: status.to_string(),
        }))
    }
}
