use campus_shared::models::GalleryItem;
use campus_shared::types::Page;
use reqwest::Method;

use crate::client::{ApiClient, Expect};
use crate::error::ApiResult;

impl ApiClient {
    pub async fn list_gallery_items(
        &self,
        token: Option<&str>,
        classroom_id: Option<&str>,
    ) -> ApiResult<Page<GalleryItem>> {
        let mut request = self.authed(Method::GET, &["gallery"], token)?;
        if let Some(classroom_id) = classroom_id {
            request = request.query(&[("classroom_id", classroom_id)]);
        }
        self.execute("list_gallery_items", request, Expect::Success)
            .await
    }
}
