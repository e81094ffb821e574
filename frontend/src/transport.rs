use futures::future::LocalBoxFuture;
use gloo_net::http::Request;
use gloo_timers::future::sleep;
use std::rc::Rc;
use shared::{
    models::{SubmitEnvelope, FORM_FIELD},
    transport::{interpret_form_reply, interpret_plain_text_reply},
    Sleep, SubmissionPipeline, Transport, TransportError, TransportKind,
};
use web_sys::FormData;
use crate::config::Config;

pub fn timer_sleep() -> Sleep {
    Rc::new(|duration| Box::pin(sleep(duration)))
}

fn js_error(e: wasm_bindgen::JsValue) -> TransportError {
    TransportError::Encode(format!("{:?}", e))
}

/// Posts the envelope as a single multipart field, the way a plain HTML form
/// would, so the endpoint does not need CORS preflight support.
pub struct FormPostTransport {
    url: String,
}

impl FormPostTransport {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl Transport for FormPostTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::FormPost
    }

    fn deliver<'a>(&'a self, envelope: &'a SubmitEnvelope) -> LocalBoxFuture<'a, Result<(), TransportError>> {
        Box::pin(async move {
            let payload = envelope.to_json().map_err(|e| TransportError::Encode(e.to_string()))?;
            let form = FormData::new().map_err(js_error)?;
            form.append_with_str(FORM_FIELD, &payload).map_err(js_error)?;

            let response = Request::post(&self.url)
                .body(form)
                .send()
                .await
                .map_err(|e| TransportError::Network(e.to_string()))?;

            interpret_form_reply(response.status())
        })
    }
}

/// Posts the raw envelope with a `text/plain` content type.
pub struct PlainTextTransport {
    url: String,
}

impl PlainTextTransport {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl Transport for PlainTextTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::PlainText
    }

    fn deliver<'a>(&'a self, envelope: &'a SubmitEnvelope) -> LocalBoxFuture<'a, Result<(), TransportError>> {
        Box::pin(async move {
            let payload = envelope.to_json().map_err(|e| TransportError::Encode(e.to_string()))?;

            let response = Request::post(&self.url)
                .header("Content-Type", "text/plain")
                .body(payload)
                .send()
                .await
                .map_err(|e| TransportError::Network(e.to_string()))?;

            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            interpret_plain_text_reply(status, &body)
        })
    }
}

pub fn build_pipeline(config: &Config) -> SubmissionPipeline {
    let sleep = timer_sleep();
    match config.endpoint_url {
        Some(url) => {
            let transports: Vec<Box<dyn Transport>> = vec![
                Box::new(FormPostTransport::new(url)),
                Box::new(PlainTextTransport::new(url)),
            ];
            SubmissionPipeline::new(transports, config.request_timeout, sleep)
        }
        None => {
            tracing::info!("no endpoint configured, using simulated transport");
            SubmissionPipeline::simulated(config.simulation(), config.request_timeout, sleep)
        }
    }
}
