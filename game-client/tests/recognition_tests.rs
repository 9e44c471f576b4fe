
use futures_util::future::join_all;
use game_client::recognition::AudioClip;
use test_helpers::*;
use tokio_test::{assert_err, assert_ok};

#[tokio::test]
async fn test_handwriting_is_posted_as_multipart_and_joined() {
    let backend = FakeBackend::start().await;
    let (client, _) = start_client(&backend).await;

    let text = client
        .recognition()
        .recognize_handwriting(vec![0x89, b'P', b'N', b'G'])
        .await
        .unwrap();
    assert_eq!(text, "CAT");

    let requests = backend.state.requests_to("/ocr/handwriting-ocr");
    assert_eq!(requests.len(), 1);
    assert!(
        requests[0]
            .content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("multipart/form-data"))
    );
}

#[tokio::test]
async fn test_handwriting_check_normalizes() {
    let backend = FakeBackend::start().await;
    let (client, _) = start_client(&backend).await;

    assert!(client.recognition().check_handwriting("cat", vec![1]).await.unwrap());
    assert!(!client.recognition().check_handwriting("dog", vec![1]).await.unwrap());
}

#[tokio::test]
async fn test_speech_recognition() {
    let backend = FakeBackend::start().await;
    let (client, _) = start_client(&backend).await;

    *backend.state.speech_text.lock().unwrap() = Some("I see a Cat".to_string());
    assert!(
        client
            .recognition()
            .check_speech("cat", AudioClip::webm(vec![1, 2, 3]))
            .await
            .unwrap()
    );

    // A reply without text is an empty transcript, not an error
    *backend.state.speech_text.lock().unwrap() = None;
    let text = client
        .recognition()
        .recognize_speech(AudioClip::webm(vec![1]))
        .await
        .unwrap();
    assert_eq!(text, "");
}

#[tokio::test]
async fn test_dictionary_lookup() {
    let backend = FakeBackend::start().await;
    let (client, _) = start_client(&backend).await;

    let dictionary = client.dictionary();
    let results = join_all(["House", "hous", "", "two words"].map(|word| dictionary.is_valid_word(word))).await;
    let results: Vec<bool> = results.into_iter().map(|result| assert_ok!(result)).collect();
    assert_eq!(results, vec![true, false, false, false]);

    // Non-candidates never reach the network
    assert_eq!(backend.state.requests_to("/api/v2/entries/en/house").len(), 1);
    assert_eq!(backend.state.requests().len(), 2);

    backend.state.fail_next("/api/v2/entries/en/tree", 500);
    assert_err!(dictionary.is_valid_word("tree").await);
}
