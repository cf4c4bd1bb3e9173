//! Tests for the metadata client against a mock HTTP server.

use om_metadata_client::{MetadataClient, MetadataClientError};
use om_playback::{LoadError, MetadataLoader};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =============================================================================
// Client Creation Tests
// =============================================================================

mod client_creation {
    use super::*;

    #[test]
    fn test_valid_http_url() {
        let client = MetadataClient::new("http://localhost:8080", "service/music.json");
        assert!(client.is_ok());
    }

    #[test]
    fn test_invalid_scheme() {
        let result = MetadataClient::new("file:///srv/music", "service/music.json");
        assert!(matches!(result, Err(MetadataClientError::InvalidUrl(_))));
    }

    #[test]
    fn test_invalid_url_maps_to_transport() {
        let err = MetadataClient::new("", "service/music.json").unwrap_err();
        assert!(matches!(LoadError::from(err), LoadError::Transport(_)));
    }
}

// =============================================================================
// Fetch Tests
// =============================================================================

mod fetch {
    use super::*;

    #[tokio::test]
    async fn test_fetch_track_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/service/music.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"[{"file": "a.mp3", "title": "A"}, {"filename": "b.mp3"}, {"title": "dropped"}]"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let client = MetadataClient::new(&server.uri(), "service/music.json").unwrap();
        let tracks = MetadataLoader::load(&client).await.unwrap();

        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].file, "a.mp3");
        assert_eq!(tracks[0].title, "A");
        assert_eq!(tracks[1].file, "b.mp3");
    }

    #[tokio::test]
    async fn test_fetch_bypasses_cache() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/service/music.json"))
            .and(header("cache-control", "no-store"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(2)
            .mount(&server)
            .await;

        let client = MetadataClient::new(&server.uri(), "service/music.json").unwrap();
        assert_eq!(client.fetch_document().await.unwrap(), "[]");
        // Every load hits the server again
        assert_eq!(client.fetch_document().await.unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/service/music.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = MetadataClient::new(&server.uri(), "service/music.json").unwrap();

        let err = client.fetch_document().await.unwrap_err();
        assert!(matches!(err, MetadataClientError::Status { status: 404, .. }));

        let err = MetadataLoader::load(&client).await.unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_server_error_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = MetadataClient::new(&server.uri(), "service/music.json").unwrap();
        let err = MetadataLoader::load(&client).await.unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_object_document_is_format_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/service/music.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"tracks": []}"#))
            .mount(&server)
            .await;

        let client = MetadataClient::new(&server.uri(), "service/music.json").unwrap();
        let err = MetadataLoader::load(&client).await.unwrap_err();
        assert!(matches!(err, LoadError::Format(_)));
    }

    #[tokio::test]
    async fn test_malformed_json_is_format_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[{"))
            .mount(&server)
            .await;

        let client = MetadataClient::new(&server.uri(), "service/music.json").unwrap();
        let err = MetadataLoader::load(&client).await.unwrap_err();
        assert!(matches!(err, LoadError::Format(_)));
    }
}
