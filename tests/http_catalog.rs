//! `HttpCatalog` against a local single-response HTTP server.

use serde_json::json;
use testresult::TestResult;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
    sync::oneshot,
    task::JoinHandle,
};

use cart_store::catalog::{Catalog, CatalogError, HttpCatalog, HttpCatalogConfig, ProductId};

struct FakeCatalog {
    base_url: String,
    request_line: oneshot::Receiver<String>,
    server: JoinHandle<std::io::Result<()>>,
}

/// Serve exactly one response and report the request line received.
async fn serve_once(status: &'static str, body: String) -> TestResult<FakeCatalog> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let base_url = format!("http://{}", listener.local_addr()?);
    let (sender, request_line) = oneshot::channel();

    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await?;
        let mut request = Vec::new();
        let mut chunk = [0_u8; 1024];

        while !request.windows(4).any(|window| window == b"\r\n\r\n") {
            let read = socket.read(&mut chunk).await?;

            if read == 0 {
                break;
            }

            request.extend(chunk.iter().take(read));
        }

        let head = String::from_utf8_lossy(&request);
        let first_line = head.lines().next().unwrap_or_default().to_string();
        if let Err(line) = sender.send(first_line) {
            return Err(std::io::Error::other(format!("nobody awaited {line}")));
        }

        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );

        socket.write_all(response.as_bytes()).await?;
        socket.shutdown().await?;

        Ok::<_, std::io::Error>(())
    });

    Ok(FakeCatalog {
        base_url,
        request_line,
        server,
    })
}

fn catalog(base_url: &str) -> HttpCatalog {
    HttpCatalog::new(HttpCatalogConfig {
        base_url: base_url.to_string(),
    })
}

#[tokio::test]
async fn stock_is_fetched_from_stock_resource() -> TestResult {
    let fake = serve_once("200 OK", json!({ "id": 3, "amount": 7 }).to_string()).await?;

    let stock = catalog(&fake.base_url).stock(ProductId::new(3)).await?;

    assert_eq!(stock.amount, 7);
    assert_eq!(stock.id, Some(ProductId::new(3)));
    assert_eq!(fake.request_line.await?, "GET /stock/3 HTTP/1.1");

    fake.server.await??;

    Ok(())
}

#[tokio::test]
async fn product_is_fetched_with_its_attributes() -> TestResult {
    let body = json!({
        "id": 2,
        "title": "Trail Shoe",
        "price": 139.9,
        "image": "https://cdn.example/trail.jpg",
    });
    let fake = serve_once("200 OK", body.to_string()).await?;

    let product = catalog(&fake.base_url).product(ProductId::new(2)).await?;

    assert_eq!(product.id, ProductId::new(2));
    assert_eq!(product.attributes.get("title"), Some(&json!("Trail Shoe")));
    assert_eq!(fake.request_line.await?, "GET /products/2 HTTP/1.1");

    fake.server.await??;

    Ok(())
}

#[tokio::test]
async fn non_success_status_is_an_error() -> TestResult {
    let fake = serve_once("404 Not Found", "{}".to_string()).await?;

    let result = catalog(&fake.base_url).stock(ProductId::new(9)).await;

    assert!(
        matches!(result, Err(CatalogError::UnexpectedResponse(ref message)) if message.contains("404")),
        "expected UnexpectedResponse, got {result:?}"
    );

    fake.server.await??;

    Ok(())
}

#[tokio::test]
async fn malformed_body_is_an_error() -> TestResult {
    let fake = serve_once("200 OK", json!({ "amount": "plenty" }).to_string()).await?;

    let result = catalog(&fake.base_url).stock(ProductId::new(1)).await;

    assert!(
        matches!(result, Err(CatalogError::Malformed(_))),
        "expected Malformed, got {result:?}"
    );

    fake.server.await??;

    Ok(())
}

#[tokio::test]
async fn mismatched_product_is_an_error() -> TestResult {
    let fake = serve_once("200 OK", json!({ "id": 5, "title": "Other" }).to_string()).await?;

    let result = catalog(&fake.base_url).product(ProductId::new(4)).await;

    assert!(
        matches!(
            result,
            Err(CatalogError::ProductMismatch { requested, returned })
                if requested == ProductId::new(4) && returned == ProductId::new(5)
        ),
        "expected ProductMismatch, got {result:?}"
    );

    fake.server.await??;

    Ok(())
}

#[tokio::test]
async fn mismatched_stock_is_an_error() -> TestResult {
    let fake = serve_once("200 OK", json!({ "id": 8, "amount": 3 }).to_string()).await?;

    let result = catalog(&fake.base_url).stock(ProductId::new(6)).await;

    assert!(
        matches!(
            result,
            Err(CatalogError::ProductMismatch { requested, returned })
                if requested == ProductId::new(6) && returned == ProductId::new(8)
        ),
        "expected ProductMismatch, got {result:?}"
    );

    fake.server.await??;

    Ok(())
}

#[tokio::test]
async fn stock_without_id_is_accepted() -> TestResult {
    let fake = serve_once("200 OK", json!({ "amount": 2 }).to_string()).await?;

    let stock = catalog(&fake.base_url).stock(ProductId::new(6)).await?;

    assert_eq!(stock.id, None);
    assert_eq!(stock.amount, 2);

    fake.server.await??;

    Ok(())
}
