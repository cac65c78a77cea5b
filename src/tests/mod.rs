use std::collections::HashSet;

use indicatif::ProgressBar;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use crate::fetcher::HttpSource;
use crate::session::Session;
use crate::view::{DetailModel, ListEntry, Presenter};

#[derive(Default)]
struct Recorder {
    lists: Vec<Vec<String>>,
    visibility: Vec<Vec<bool>>,
    details: Vec<DetailModel>,
    placeholder: Option<String>,
}

impl Presenter for Recorder {
    fn render_list(&mut self, entries: &[ListEntry]) {
        self.lists
            .push(entries.iter().map(|e| e.text.clone()).collect());
    }

    fn update_visibility(&mut self, entries: &[ListEntry]) {
        self.visibility
            .push(entries.iter().map(|e| e.visible).collect());
    }

    fn render_detail(&mut self, detail: &DetailModel) {
        self.details.push(detail.clone());
    }

    fn set_error_placeholder(&mut self, message: &str) {
        self.placeholder = Some(message.to_string());
    }
}

fn name_for(id: u32) -> String {
    match id {
        1 => "bulbasaur".to_string(),
        4 => "charmander".to_string(),
        7 => "squirtle".to_string(),
        25 => "pikachu".to_string(),
        132 => "ditto".to_string(),
        _ => format!("mon{id}"),
    }
}

fn record_json(id: u32) -> String {
    let sprite = if id == 132 {
        "null".to_string()
    } else {
        format!("\"https://img.example/{id}.png\"")
    };
    format!(
        r#"{{"id": {id}, "name": "{}", "weight": 60,
            "stats": [
                {{"base_stat": {}, "effort": 0, "stat": {{"name": "hp"}}}},
                {{"base_stat": 100, "effort": 0, "stat": {{"name": "speed"}}}}
            ],
            "sprites": {{"front_default": {sprite}, "back_default": null}},
            "types": [{{"slot": 1, "type": {{"name": "normal"}}}}]}}"#,
        name_for(id),
        id % 256
    )
}

async fn answer(mut socket: TcpStream, failing: HashSet<u32>) {
    let mut request = Vec::new();
    let mut buf = [0u8; 1024];
    loop {
        let n = match socket.read(&mut buf).await {
            Ok(0) | Err(_) => return,
            Ok(n) => n,
        };
        request.extend_from_slice(&buf[..n]);
        if request.windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
    }
    let request = String::from_utf8_lossy(&request);
    let id = request
        .split_whitespace()
        .nth(1)
        .filter(|path| path.contains("/pokemon/"))
        .and_then(|path| path.trim_end_matches('/').rsplit('/').next())
        .and_then(|id| id.parse::<u32>().ok());

    let (status_line, body) = match id {
        Some(id) if failing.contains(&id) => ("500 Internal Server Error", "{}".to_string()),
        Some(id) => ("200 OK", record_json(id)),
        None => ("404 Not Found", "{}".to_string()),
    };
    let response = format!(
        "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

// a catalog server on a random local port; ids in `failing` answer 500
async fn serve_catalog(failing: &[u32]) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let failing: HashSet<u32> = failing.iter().copied().collect();
    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            tokio::spawn(answer(socket, failing.clone()));
        }
    });
    format!("http://{addr}/api/v2")
}

fn source(api_url: &str) -> HttpSource {
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    HttpSource::new(client, api_url)
}

#[tokio::test]
async fn full_catalog_loads_in_id_order() {
    let api = serve_catalog(&[]).await;
    let index = crate::loader::load_index(&source(&api), 151, &ProgressBar::hidden())
        .await
        .unwrap();

    assert_eq!(index.len(), 151);
    for (pos, record) in index.iter().enumerate() {
        assert_eq!(record.id as usize, pos + 1);
    }
    assert_eq!(index.get(25).map(|r| r.name.as_str()), Some("pikachu"));
}

#[tokio::test]
async fn one_failed_fetch_shows_only_the_error_placeholder() {
    let api = serve_catalog(&[73]).await;
    let mut presenter = Recorder::default();

    let result = Session::load(&source(&api), 151, &ProgressBar::hidden(), &mut presenter).await;

    assert!(result.is_err());
    assert!(presenter.lists.is_empty());
    assert!(presenter.details.is_empty());
    assert_eq!(presenter.placeholder.as_deref(), Some("Error Loading Pokemon"));
}

#[tokio::test]
async fn unreachable_catalog_shows_only_the_error_placeholder() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let mut presenter = Recorder::default();

    let result = Session::load(
        &source(&format!("http://{addr}/api/v2")),
        151,
        &ProgressBar::hidden(),
        &mut presenter,
    )
    .await;

    match result {
        Err(crate::loader::LoadError::Fetch { source, .. }) => {
            assert!(matches!(source, crate::fetcher::FetchError::Network { .. }));
        }
        Err(other) => panic!("unexpected error: {other:?}"),
        Ok(_) => panic!("load against a closed port succeeded"),
    }
    assert!(presenter.lists.is_empty());
    assert!(presenter.details.is_empty());
    assert_eq!(presenter.placeholder.as_deref(), Some("Error Loading Pokemon"));
}

#[tokio::test]
async fn list_filter_and_selection_over_a_loaded_catalog() {
    let api = serve_catalog(&[]).await;
    let mut presenter = Recorder::default();
    let mut session = Session::load(&source(&api), 151, &ProgressBar::hidden(), &mut presenter)
        .await
        .unwrap();

    let list = &presenter.lists[0];
    assert_eq!(list.len(), 151);
    assert_eq!(list[0], "001 Bulbasaur");
    assert_eq!(list[24], "025 Pikachu");
    assert_eq!(list[150], "151 Mon151");

    session.filter("CHAR", &mut presenter);
    let visible: Vec<usize> = presenter.visibility[0]
        .iter()
        .enumerate()
        .filter(|(_, v)| **v)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(visible, vec![3]);

    session.filter("", &mut presenter);
    assert!(presenter.visibility[1].iter().all(|v| *v));

    assert_eq!(session.select_id(25, &mut presenter), Some(25));
    let pikachu = presenter.details.last().unwrap();
    assert_eq!(pikachu.label, "Pikachu");
    assert_eq!(
        pikachu.sprite.as_ref().map(|s| s.alt.as_str()),
        Some("pikachusprite")
    );
    assert_eq!(pikachu.bar("hp").map(|b| b.label.as_str()), Some("25"));
    assert_eq!(
        pikachu.bar("speed").map(|b| b.width()),
        Some("39.21568627450981%".to_string())
    );

    session.select_id(132, &mut presenter);
    let ditto = presenter.details.last().unwrap();
    assert_eq!(ditto.label, "Ditto");
    assert!(ditto.sprite.is_none());
    assert_eq!(session.selection(), Some(132));
}
