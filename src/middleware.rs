use std::{future::Ready, rc::Rc};

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderName, HeaderValue},
    Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use uuid::Uuid;

/// Tags every request with a fresh id. The id is stored in the request
/// extensions for handlers to log with, and echoed back to the client in
/// the `x-request-id` response header so a failed generation can be
/// matched to its server logs.
pub struct RequestIdMiddleware;

impl<S, B> Transform<S, ServiceRequest> for RequestIdMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestIdMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        std::future::ready(Ok(RequestIdMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct RequestIdMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequestIdMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let request_id = Uuid::new_v4().to_string();
        req.extensions_mut().insert(request_id.clone());

        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let mut res = service.call(req).await?;
            if let Ok(value) = HeaderValue::from_str(&request_id) {
                res.headers_mut()
                    .insert(HeaderName::from_static("x-request-id"), value);
            }
            Ok(res.map_into_left_body())
        })
    }
}

pub fn get_request_id(req: &actix_web::HttpRequest) -> Option<String> {
    req.extensions().get::<String>().cloned()
}

#[cfg(test)]
mod tests {
    use actix_web::{test, web, App, HttpRequest, HttpResponse};

    use super::*;

    #[actix_web::test]
    async fn every_response_carries_a_request_id_header() {
        let app = test::init_service(
            App::new()
                .wrap(RequestIdMiddleware)
                .route("/ping", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/ping").to_request()).await;

        let header = res
            .headers()
            .get("x-request-id")
            .expect("response should carry a request id");
        assert_eq!(header.to_str().unwrap().len(), 36);
    }

    #[actix_web::test]
    async fn handlers_can_read_the_request_id() {
        async fn echo(req: HttpRequest) -> HttpResponse {
            match get_request_id(&req) {
                Some(id) => HttpResponse::Ok().body(id),
                None => HttpResponse::InternalServerError().finish(),
            }
        }

        let app = test::init_service(
            App::new()
                .wrap(RequestIdMiddleware)
                .route("/echo", web::get().to(echo)),
        )
        .await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/echo").to_request()).await;
        assert!(res.status().is_success());

        let body = test::read_body(res).await;
        assert_eq!(body.len(), 36);
    }
}
