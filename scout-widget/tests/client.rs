use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};

use scout_widget::transport::{ClientError, ConnectorFn, DynStream, SearchClient};

fn one_shot_connector(
    shared: Arc<Mutex<Option<tokio::io::DuplexStream>>>,
) -> Arc<ConnectorFn> {
    Arc::new(move |_host: &str, _port: u16| {
        let cli = shared.lock().unwrap().take().ok_or(ClientError::Connection);
        Box::pin(async move { cli.map(|s| Box::pin(s) as DynStream) })
            as Pin<Box<dyn Future<Output = Result<DynStream, ClientError>> + Send>>
    })
}

#[tokio::test]
async fn client_parses_success_response() {
    let (mut server, client_side) = tokio::io::duplex(1 << 16);
    let shared = Arc::new(Mutex::new(Some(client_side)));
    let mut client = SearchClient::new_test(one_shot_connector(shared));
    // Tiny header chunk to ensure no over-reading
    client.header_read_chunk = 1;

    let fut = client.post_json("http://search.test/search", br#"{"search_term":"x","page_index":0}"#);

    let srv = async move {
        // Consume the request so the client's writes cannot stall
        let mut buf = [0u8; 512];
        let _ = server.read(&mut buf).await.unwrap_or(0);
        let body = br#"{"total": 0, "results": []}"#;
        let resp = format!(
            "HTTP/1.1 200 OK\r\ncontent-length: {}\r\ncontent-type: application/json\r\n\r\n",
            body.len()
        );
        server.write_all(resp.as_bytes()).await.unwrap();
        server.write_all(body).await.unwrap();
    };

    let (res, _) = tokio::join!(fut, srv);
    let resp = res.expect("client ok");
    assert_eq!(resp.code, 200);
    assert_eq!(
        String::from_utf8_lossy(&resp.body),
        r#"{"total": 0, "results": []}"#
    );
}

#[tokio::test]
async fn client_sends_post_with_json_headers() {
    let (mut server, client_side) = tokio::io::duplex(1 << 16);
    let shared = Arc::new(Mutex::new(Some(client_side)));
    let client = SearchClient::new_test(one_shot_connector(shared));

    let body = br#"{"search_term":"search string","page_index":0}"#;
    let fut = client.post_json("http://search.test/search", body);

    let srv = async move {
        let mut seen = Vec::new();
        let mut buf = [0u8; 1024];
        // The whole request is smaller than the duplex buffer; read until
        // the JSON body has arrived.
        while !seen.contains(&b'}') {
            let n = server.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            seen.extend_from_slice(&buf[..n]);
        }
        let text = String::from_utf8_lossy(&seen).to_string();
        let resp = "HTTP/1.1 200 OK\r\ncontent-length: 0\r\n\r\n";
        server.write_all(resp.as_bytes()).await.unwrap();
        text
    };

    let (res, request_text) = tokio::join!(fut, srv);
    res.expect("client ok");
    assert!(request_text.starts_with("POST /search HTTP/1.1\r\n"));
    assert!(request_text.contains("host: search.test"));
    assert!(request_text.contains("content-type: application/json"));
    assert!(request_text.contains(r#""search_term":"search string""#));
}

#[tokio::test]
async fn client_rejects_non_http_endpoint() {
    let shared = Arc::new(Mutex::new(None));
    let client = SearchClient::new_test(one_shot_connector(shared));
    let res = client.post_json("ftp://search.test/search", b"{}").await;
    assert_eq!(res, Err(ClientError::InvalidMessage));
}

#[tokio::test]
async fn client_errors_on_oversize_body() {
    let (mut server, client_side) = tokio::io::duplex(1 << 16);
    let shared = Arc::new(Mutex::new(Some(client_side)));
    let client = SearchClient::new_test(one_shot_connector(shared));

    let fut = client.post_json("http://search.test/search", b"{}");

    let srv = async move {
        let mut buf = [0u8; 512];
        let _ = server.read(&mut buf).await.unwrap_or(0);
        // Declare a body far past the cap and send nothing else
        let resp = format!(
            "HTTP/1.1 200 OK\r\ncontent-length: {}\r\n\r\n",
            scout_api::limits::MAX_RESPONSE_BYTES + 1
        );
        server.write_all(resp.as_bytes()).await.unwrap();
    };

    let (res, _) = tokio::join!(fut, srv);
    match res {
        Err(ClientError::Io) => {}
        other => panic!("expected Io, got {other:?}"),
    }
}

#[tokio::test]
async fn client_times_out_on_silent_server() {
    // Connector produces a stream that never answers
    let connector: Arc<ConnectorFn> = Arc::new(|_host: &str, _port: u16| {
        Box::pin(async move {
            let (server, client) = tokio::io::duplex(1024);
            // keep the server end alive so the client sees silence, not EOF
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_secs(60)).await;
                drop(server);
            });
            Ok(Box::pin(client) as DynStream)
        })
    });
    let mut client = SearchClient::new_test(connector);
    client.req_timeout = Duration::from_millis(20);
    let res = client.post_json("http://search.test/search", b"{}").await;
    assert_eq!(res, Err(ClientError::Timeout));
}

#[tokio::test]
async fn client_reports_malformed_status_line() {
    let (mut server, client_side) = tokio::io::duplex(1 << 16);
    let shared = Arc::new(Mutex::new(Some(client_side)));
    let client = SearchClient::new_test(one_shot_connector(shared));

    let fut = client.post_json("http://search.test/search", b"{}");

    let srv = async move {
        let mut buf = [0u8; 512];
        let _ = server.read(&mut buf).await.unwrap_or(0);
        server
            .write_all(b"GARBAGE 200 OK\r\ncontent-length: 0\r\n\r\n")
            .await
            .unwrap();
    };

    let (res, _) = tokio::join!(fut, srv);
    assert_eq!(res, Err(ClientError::InvalidMessage));
}
