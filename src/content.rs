use crate::connection::HandleError;
use crate::request::Request;
use crate::response::{Response, ResponseBuilder};
use crate::response_status_code::ResponseStatusCode;
use crate::server_config::{Config, DEFAULT_NOT_FOUND_PAGE};
use log::debug;
use std::fs;
use std::path::PathBuf;

/// What a request resolves to before any file is touched.
#[derive(Debug, PartialEq, Eq)]
pub enum Resolution {
    File {
        path: PathBuf,
        status_code: ResponseStatusCode,
    },
    Redirect(String),
    Empty(ResponseStatusCode),
}

/// Exact-match route lookup. Unknown paths resolve to the 404 page.
pub fn resolve(config: &Config, request: &Request) -> Resolution {
    let Some(route) = config.routes.get(&request.path) else {
        return resolve_status(config, ResponseStatusCode::NotFound);
    };

    if !route.allows(request.method.as_str()) {
        return resolve_status(config, ResponseStatusCode::MethodNotAllowed);
    }

    if let Some(limit) = route.body_limit() {
        if request.body.len() > limit {
            return resolve_status(config, ResponseStatusCode::PayloadTooLarge);
        }
    }

    if let Some(location) = &route.redirect {
        return Resolution::Redirect(location.clone());
    }

    let root = route
        .root
        .as_ref()
        .unwrap_or(&config.server.static_root);

    Resolution::File {
        path: root.join(route.default_file()),
        status_code: ResponseStatusCode::Ok,
    }
}

/// Error page for `status_code`, if one is configured. A 404 always has a
/// page and falls back to `404.html`.
pub fn resolve_status(config: &Config, status_code: ResponseStatusCode) -> Resolution {
    let page = match config.default_server.error_page(status_code.code()) {
        Some(page) => page,
        None if status_code == ResponseStatusCode::NotFound => DEFAULT_NOT_FOUND_PAGE,
        None => return Resolution::Empty(status_code),
    };

    Resolution::File {
        path: config.server.static_root.join(page),
        status_code,
    }
}

pub fn render(resolution: Resolution) -> Result<Response, HandleError> {
    match resolution {
        Resolution::File { path, status_code } => {
            debug!("Serving {} with {}", path.display(), status_code.code());

            let contents = fs::read(&path).map_err(|source| HandleError::RouteFileRead {
                path: path.clone(),
                source,
            })?;

            Ok(Response::builder()
                .status_code(status_code)
                .body(contents)
                .get())
        }
        Resolution::Redirect(location) => Ok(ResponseBuilder::redirect(&location)),
        Resolution::Empty(status_code) => Ok(Response::builder().status_code(status_code).get()),
    }
}

pub fn serve_content(config: &Config, request: &Request) -> Result<Response, HandleError> {
    render(resolve(config, request))
}
