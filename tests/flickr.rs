//! End-to-end checks of the reqwest transport against a local mock of the REST API.

use std::{net::TcpListener, thread};

use findr::{
    ApiClient, ApiError, CallbackQueue, ClientSettings, Flickr, Photo, PhotoDetailResult,
    PhotoSearchResult, Request, callback_context,
};
use pretty_assertions::assert_eq;
use reqwest::{StatusCode, Url};
use tokio::sync::oneshot;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

const SEARCH: &str = include_str!("fixtures/search-response.json");
const DETAIL: &str = include_str!("fixtures/photo-detail.json");

fn flickr(server: &MockServer) -> Flickr {
    Flickr::new("test-key")
        .unwrap()
        .with_base_url(Url::parse(&server.uri()).unwrap())
}

fn client() -> (ApiClient, CallbackQueue) {
    let (callbacks, queue) = callback_context();
    let client = ApiClient::with_settings(&ClientSettings::default(), callbacks).unwrap();

    (client, queue)
}

async fn respond_with(status: u16, body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/services/rest"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(&server)
        .await;

    server
}

#[tokio::test]
async fn search_sends_the_expected_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/services/rest"))
        .and(query_param("api_key", "test-key"))
        .and(query_param("format", "json"))
        .and(query_param("nojsoncallback", "1"))
        .and(query_param("method", "flickr.photos.search"))
        .and(query_param("text", "red sox"))
        .and(query_param("per_page", "25"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SEARCH))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _queue) = client();
    let result: PhotoSearchResult = client
        .fetch(&flickr(&server).search_photos("red sox"))
        .await
        .unwrap();

    assert_eq!(result.photos.len(), 25);
    assert_eq!(result.photos[0].id(), "51959073681");
}

#[tokio::test]
async fn details_are_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/services/rest"))
        .and(query_param("method", "flickr.photos.getInfo"))
        .and(query_param("photo_id", "51957499633"))
        .and(query_param("secret", "6cbdfb0d53"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DETAIL))
        .mount(&server)
        .await;

    let (client, _queue) = client();
    let result: PhotoDetailResult = client
        .fetch(&flickr(&server).get_photo_details("51957499633", "6cbdfb0d53"))
        .await
        .unwrap();

    assert_eq!(result.photo.title(), "Boston Red Sox vs. Toronto Blue Jays");
}

#[tokio::test]
async fn created_counts_as_success() {
    let server = respond_with(201, "raw").await;
    let (client, _queue) = client();

    let body = client
        .execute(&flickr(&server).search_photos("x"))
        .await
        .unwrap();

    assert_eq!(&body[..], b"raw");
}

#[tokio::test]
async fn not_found_is_a_request_error() {
    let server = respond_with(404, "").await;
    let (client, _queue) = client();

    let err = client
        .execute(&flickr(&server).search_photos("x"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Request(StatusCode::NOT_FOUND)));
}

#[tokio::test]
async fn unavailable_is_a_server_error() {
    let server = respond_with(503, "").await;
    let (client, _queue) = client();

    let err = client
        .execute(&flickr(&server).search_photos("x"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ApiError::Server(StatusCode::SERVICE_UNAVAILABLE)
    ));
}

#[tokio::test]
async fn html_body_is_a_decoding_error() {
    let server = respond_with(200, "<html>maintenance</html>").await;
    let (client, _queue) = client();

    let err = client
        .fetch::<PhotoSearchResult>(&flickr(&server).search_photos("x"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Decoding(_)));
}

#[tokio::test]
async fn refused_connection_is_a_network_error() {
    let address = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let flickr = Flickr::new("test-key")
        .unwrap()
        .with_base_url(Url::parse(&format!("http://{address}/")).unwrap());
    let (client, _queue) = client();

    let err = client
        .execute(&flickr.search_photos("x"))
        .await
        .unwrap_err();

    let ApiError::Network(cause) = &err else {
        panic!("expected a network error, got {err:?}");
    };
    assert!(cause.is::<reqwest::Error>());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn send_delivers_on_the_callback_queue() {
    let server = respond_with(200, SEARCH).await;
    let (client, mut queue) = client();
    let (tx, rx) = oneshot::channel();

    let caller = thread::current().id();
    let exchange = client.send(Request::search_photos(&flickr(&server), "red sox", move |result| {
        let on_caller = thread::current().id() == caller;
        let _ = tx.send((result.map(|found| found.photos.len()), on_caller));
    }));

    exchange.await.unwrap();
    assert!(queue.next().await);

    let (result, on_caller) = rx.await.unwrap();
    assert_eq!(result.unwrap(), 25);
    assert!(on_caller);
}

#[tokio::test]
async fn send_reports_failures_through_the_completion() {
    let server = respond_with(500, "").await;
    let (client, mut queue) = client();
    let (tx, rx) = oneshot::channel();

    let exchange = client.send(Request::get_photo_details(
        &flickr(&server),
        "1",
        "2",
        move |result| {
            let _ = tx.send(result.map(|_| ()));
        },
    ));

    exchange.await.unwrap();
    assert!(queue.next().await);
    assert!(matches!(
        rx.await.unwrap(),
        Err(ApiError::Server(StatusCode::INTERNAL_SERVER_ERROR))
    ));
}
