//! End-to-end tests against a listening server.

use std::net::SocketAddr;
use std::time::Duration;

use little_lemon::lifecycle::Shutdown;
use little_lemon::HttpServer;

mod common;

async fn start_server() -> (SocketAddr, Shutdown, tokio::task::JoinHandle<()>) {
    let store = common::seeded_store(&["Greek Salad", "Bruschetta"]).await;
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(common::test_config(), store);
    let server_shutdown = shutdown.subscribe();
    let handle = tokio::spawn(async move {
        server.run(listener, server_shutdown).await.unwrap();
    });

    (addr, shutdown, handle)
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_booking_round_trip_over_http() {
    let (addr, shutdown, handle) = start_server().await;
    let client = client();
    let base = format!("http://{addr}");

    let res = client.get(format!("{base}/menu/")).send().await.expect("Server unreachable");
    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["x-template"], "menu.html");
    let body = res.text().await.unwrap();
    assert!(body.contains("Greek Salad"));
    assert!(body.contains("Bruschetta"));

    let res = client
        .post(format!("{base}/book/"))
        .form(&[
            ("first_name", "John"),
            ("last_name", "Doe"),
            ("guest_number", "2"),
            ("comment", "Near the window"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 302);
    assert_eq!(res.headers()["location"], "/book/");
    let cookie = res.headers()["set-cookie"]
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string();

    let res = client
        .get(format!("{base}/book/"))
        .header("cookie", cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let body = res.text().await.unwrap();
    assert!(body.contains("Success reservation for John Doe!"));

    shutdown.trigger();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("Server did not stop")
        .unwrap();
}

#[tokio::test]
async fn test_server_stops_on_shutdown() {
    let (addr, shutdown, handle) = start_server().await;

    let res = client().get(format!("http://{addr}/")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert!(res.text().await.unwrap().contains("Little Lemon"));

    shutdown.trigger();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("Server did not stop")
        .unwrap();

    assert!(client().get(format!("http://{addr}/")).send().await.is_err());
}
