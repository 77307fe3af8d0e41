//! Build script generating the gRPC service and client stubs.
//!
//! The message types are hand-written prost structs in `src/rpc/messages.rs`,
//! so the service is described with tonic-build's manual builder instead of a
//! `.proto` file. No `protoc` is needed at build time.
//! The generated code is written to `$OUT_DIR/library.v1.LibraryService.rs`.

use tonic_build::manual::{Builder, Method, Service};

const MESSAGES: &str = "crate::rpc::messages";

fn unary(name: &str, route: &str, input: &str, output: &str) -> Method {
    Method::builder()
        .name(name)
        .route_name(route)
        .input_type(format!("{MESSAGES}::{input}"))
        .output_type(format!("{MESSAGES}::{output}"))
        .codec_path("tonic::codec::ProstCodec")
        .build()
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let service = Service::builder()
        .name("LibraryService")
        .package("library.v1")
        .method(unary("register_user", "RegisterUser", "RegisterUserRequest", "RegisterUserResponse"))
        .method(unary("login_user", "LoginUser", "LoginUserRequest", "LoginUserResponse"))
        .method(unary("create_book", "CreateBook", "CreateBookRequest", "CreateBookResponse"))
        .method(unary("get_book", "GetBook", "GetBookRequest", "GetBookResponse"))
        .method(unary("list_books", "ListBooks", "ListBooksRequest", "ListBooksResponse"))
        .method(unary("borrow_book", "BorrowBook", "BorrowBookRequest", "BorrowBookResponse"))
        .method(unary("return_book", "ReturnBook", "ReturnBookRequest", "ReturnBookResponse"))
        .method(unary(
            "check_book_availability",
            "CheckBookAvailability",
            "CheckBookAvailabilityRequest",
            "CheckBookAvailabilityResponse",
        ))
        .build();

    Builder::new().compile(&[service]);
}
