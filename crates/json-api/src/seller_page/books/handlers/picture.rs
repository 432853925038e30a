//! Upload Book Picture Handler

use std::sync::Arc;

use readitagain_app::domain::books::{data::NewBookPicture, records::BookPictureUuid};
use salvo::{oapi::extract::PathParam, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    books::errors::into_status_error,
    extensions::*,
    state::State,
    uploads::{self, ImageKind},
};

/// Multipart field holding the image.
const FILE_FIELD: &str = "file";

/// Picture Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PictureResponse {
    pub uuid: Uuid,

    /// File name, served from `/images/{file}?type=book`
    pub path: String,
    pub position: i32,
}

/// Upload Book Picture Handler
///
/// Accepts a multipart form with a `file` field.
#[endpoint(
    tags("seller"),
    summary = "Upload a Book Picture",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Picture stored"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing or unsupported file"),
        (status_code = StatusCode::NOT_FOUND, description = "Book not found"),
    ),
)]
pub(crate) async fn handler(
    book: PathParam<Uuid>,
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<PictureResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let seller = depot.member_uuid_or_401()?;

    let file = req
        .file(FILE_FIELD)
        .await
        .ok_or_else(|| StatusError::bad_request().brief("Missing file field"))?;

    let file_name = state
        .uploads
        .store(ImageKind::Book, file.path(), file.name())
        .await
        .map_err(uploads::into_status_error)?;

    let picture = NewBookPicture {
        uuid: BookPictureUuid::new(),
        path: file_name.clone(),
    };

    let picture = match state
        .app
        .books
        .add_picture(seller, book.into_inner().into(), picture)
        .await
    {
        Ok(picture) => picture,
        Err(error) => {
            state.uploads.discard(ImageKind::Book, &file_name).await;

            return Err(into_status_error(error));
        }
    };

    res.status_code(StatusCode::CREATED);

    Ok(Json(PictureResponse {
        uuid: picture.uuid.into(),
        path: picture.path,
        position: picture.position,
    }))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use readitagain_app::domain::books::{
        BooksServiceError,
        records::{BookPictureRecord, BookUuid},
    };
    use salvo::{
        http::header::CONTENT_TYPE,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use crate::{
        test_helpers::{Mocks, TEST_MEMBER_UUID, multipart_file},
        uploads::Uploads,
    };

    use super::*;

    fn make_service(mocks: Mocks, uploads: Uploads) -> Service {
        mocks.service_with_uploads(
            uploads,
            Router::with_path("seller_page/book/{book}/picture").post(handler),
        )
    }

    #[tokio::test]
    async fn test_picture_is_stored_and_recorded() -> TestResult {
        let dir = tempfile::tempdir()?;
        let uploads = Uploads::new(dir.path());
        let uuid = BookUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .books
            .expect_add_picture()
            .once()
            .withf(move |seller, book, picture| {
                *seller == TEST_MEMBER_UUID && *book == uuid && picture.path.ends_with(".png")
            })
            .return_once(|_, book, picture| {
                Ok(BookPictureRecord {
                    uuid: picture.uuid,
                    book_uuid: book,
                    path: picture.path,
                    position: 0,
                    created_at: Timestamp::UNIX_EPOCH,
                })
            });

        let (content_type, body) = multipart_file("file", "cover.png", "png bytes");

        let mut res = TestClient::post(format!(
            "http://example.com/seller_page/book/{uuid}/picture"
        ))
        .add_header(CONTENT_TYPE, content_type, true)
        .body(body)
        .send(&make_service(mocks, uploads.clone()))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let picture: PictureResponse = res.take_json().await?;
        let stored = tokio::fs::read_to_string(uploads.locate(ImageKind::Book, &picture.path)?)
            .await?;

        assert_eq!(stored, "png bytes");

        Ok(())
    }

    #[tokio::test]
    async fn test_foreign_book_discards_the_upload() -> TestResult {
        let dir = tempfile::tempdir()?;
        let uploads = Uploads::new(dir.path());
        let mut mocks = Mocks::default();

        mocks
            .books
            .expect_add_picture()
            .once()
            .return_once(|_, _, _| Err(BooksServiceError::NotFound));

        let (content_type, body) = multipart_file("file", "cover.jpg", "jpeg bytes");

        let res = TestClient::post(format!(
            "http://example.com/seller_page/book/{}/picture",
            Uuid::now_v7()
        ))
        .add_header(CONTENT_TYPE, content_type, true)
        .body(body)
        .send(&make_service(mocks, uploads))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        let mut entries = tokio::fs::read_dir(dir.path().join("book")).await?;

        assert!(
            entries.next_entry().await?.is_none(),
            "expected the stored file to be removed"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_non_image_returns_400() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut mocks = Mocks::default();

        mocks.books.expect_add_picture().never();

        let (content_type, body) = multipart_file("file", "notes.txt", "text");

        let res = TestClient::post(format!(
            "http://example.com/seller_page/book/{}/picture",
            Uuid::now_v7()
        ))
        .add_header(CONTENT_TYPE, content_type, true)
        .body(body)
        .send(&make_service(mocks, Uploads::new(dir.path())))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
