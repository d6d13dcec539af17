use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use futures_util::TryStreamExt;

use crate::adapter::CartooniserAdapter;
use crate::error::{AdapterError, Result};
use crate::request::RequestData;

/// Handles the cartoonise endpoint
///
/// Parts carrying a filename become image payloads in arrival order; every
/// other part is a named value such as `model_name`. Processing failures are
/// reported in the JSON body, not through the status code.
pub async fn cartoonise(
    payload: Multipart,
    adapter: web::Data<CartooniserAdapter>,
) -> Result<HttpResponse> {
    let options = adapter.options();
    let request = extract_request(payload, &options.queue_name, options.max_upload_bytes).await?;
    log::info!(
        "Request {} on {} with {} image(s)",
        request.request_id,
        request.queue,
        request.file_count()
    );

    let adapter = adapter.into_inner();
    let response = web::block(move || adapter.process(&request))
        .await
        .map_err(|e| AdapterError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok().json(response))
}

pub async fn status(adapter: web::Data<CartooniserAdapter>) -> HttpResponse {
    HttpResponse::Ok().json(adapter.status())
}

pub async fn selftest(adapter: web::Data<CartooniserAdapter>) -> Result<HttpResponse> {
    let adapter = adapter.into_inner();
    let report = web::block(move || adapter.selftest())
        .await
        .map_err(|e| AdapterError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok().json(report))
}

/// Builds a [`RequestData`] from multipart form data, buffering at most `limit` bytes in total
async fn extract_request(mut payload: Multipart, queue: &str, limit: usize) -> Result<RequestData> {
    let mut request = RequestData::new(queue, "cartoonise");
    let mut buffered = 0usize;

    while let Some(mut field) = payload.try_next().await? {
        let content_disposition = field.content_disposition();
        let is_file = content_disposition.get_filename().is_some();
        let name = content_disposition.get_name().map(str::to_string);

        let mut data = Vec::new();
        while let Some(chunk) = field.try_next().await? {
            buffered += chunk.len();
            if buffered > limit {
                return Err(AdapterError::PayloadTooLarge { limit });
            }
            data.extend_from_slice(&chunk);
        }

        match (is_file, name) {
            (true, _) => {
                request.add_file(data);
            }
            (false, Some(name)) => {
                let value = String::from_utf8(data).map_err(|_| {
                    AdapterError::InvalidInput(format!("Field '{}' is not valid UTF-8", name))
                })?;
                request.add_value(name, value);
            }
            (false, None) => {
                return Err(AdapterError::InvalidInput(
                    "Form field without a name".to_string(),
                ));
            }
        }
    }

    Ok(request)
}
