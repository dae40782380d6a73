use std::sync::Arc;

use pdf2qa::api::{self, UploadResponse};
use pdf2qa::error::{ExtractionError, GenerationError};
use pdf2qa::infrastructure::{RegexTokenizer, SentenceTokenizer, TextExtractor};
use pdf2qa::processing::{parse_response, segment};
use pdf2qa::{Config, DocumentProcessor, Generator};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

const DOCUMENT: &str = "Rust is a systems programming language. It guarantees memory safety \
without a garbage collector. Ownership rules are checked at compile time.\n\n\
Cargo is the Rust package manager. It builds code and downloads dependencies. \
Crates are published to crates.io.";

/// 忽略输入字节，直接返回固定文本的提取器
struct FixedTextExtractor(&'static str);

impl TextExtractor for FixedTextExtractor {
    fn extract_text(&self, _data: &[u8]) -> Result<String, ExtractionError> {
        Ok(self.0.to_string())
    }
}

/// 模拟 LLM：根据段落首词生成两组问答，夹带编号和噪声行
struct FakeLlm;

impl Generator for FakeLlm {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let paragraph = prompt
            .split_once("per paragraph wise: ")
            .map(|(_, p)| p)
            .unwrap_or_default();
        let subject = paragraph.split_whitespace().next().unwrap_or("It");
        Ok(format!(
            "Here are your questions:\n\n\
             Q1: What is {subject}?\n\
             A1: {subject} is described in the text.\n\
             \n\
             Q2. Why does {subject} matter?\n\
             A2 - Because the paragraph says so.\n\
             A2 (cont.) - It also adds detail.\n"
        ))
    }
}

fn processor(config: &Config) -> DocumentProcessor<FakeLlm> {
    DocumentProcessor::new(
        Arc::new(FixedTextExtractor(DOCUMENT)),
        Arc::new(RegexTokenizer::new().unwrap()),
        FakeLlm,
        config,
    )
}

#[tokio::test]
async fn test_pdf_to_records_pipeline() {
    let config = Config {
        paragraph_token_budget: 20,
        ..Config::default()
    };

    let report = processor(&config)
        .process_pdf(b"%PDF-ignored".to_vec())
        .await
        .expect("转换应该成功");

    // 每个段落两条问答
    assert!(report.paragraph_count >= 2);
    assert_eq!(report.records.len(), report.paragraph_count * 2);
    assert!(report.skipped_records.is_empty());
    assert!(report.failed_paragraphs.is_empty());

    let first = &report.records[0];
    assert!(first.paragraph.starts_with("Rust is a systems programming language."));
    assert_eq!(first.question, "What is Rust?");
    assert_eq!(first.answer, "Rust is described in the text.");

    let second = &report.records[1];
    assert_eq!(second.question, "Why does Rust matter?");
    // 多行答案按最先出现的分隔符切一次
    assert_eq!(
        second.answer,
        "Because the paragraph says so.\nA2 (cont.) - It also adds detail."
    );

    // 段落顺序与原文一致
    assert!(report
        .records
        .last()
        .unwrap()
        .paragraph
        .contains("crates.io"));
}

#[test]
fn test_segmentation_preserves_every_sentence() {
    let tokenizer = RegexTokenizer::new().unwrap();
    let sentences = tokenizer.split_sentences(DOCUMENT);

    for budget in [1, 5, 12, 40, 1000] {
        let paragraphs = segment(&sentences, budget, |s| tokenizer.count_tokens(s));
        assert_eq!(paragraphs.join(" "), sentences.join(" "), "budget {budget}");
        assert!(paragraphs.iter().all(|p| !p.is_empty()));
    }
}

#[test]
fn test_truncated_response_degrades_gracefully() {
    let pairs = parse_response("Q1: What is Rust?\nA1: A lang");
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].answer, "A1: A lang\n");

    assert!(parse_response("Sorry, I can't").is_empty());
}

async fn send_raw_request(addr: std::net::SocketAddr, content_type: &str, body: &str) -> String {
    let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
    let request = format!(
        "POST /upload-pdf HTTP/1.1\r\nHost: localhost\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        content_type,
        body.len(),
        body
    );
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

fn response_body(raw: &str) -> UploadResponse {
    let (_, body) = raw.split_once("\r\n\r\n").expect("响应缺少 body");
    serde_json::from_str(body).expect("响应 body 不是 JSON")
}

#[tokio::test]
async fn test_upload_endpoint() {
    let config = Config {
        paragraph_token_budget: 20,
        ..Config::default()
    };
    let app = api::router(Arc::new(processor(&config)), config.max_upload_bytes);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let boundary = "pdf2qa-boundary";
    let content_type = format!("multipart/form-data; boundary={boundary}");

    // 正常上传
    let body = format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"doc.pdf\"\r\nContent-Type: application/pdf\r\n\r\n%PDF-1.4 fake\r\n--{boundary}--\r\n"
    );
    let raw = send_raw_request(addr, &content_type, &body).await;
    assert!(raw.starts_with("HTTP/1.1 200"), "unexpected response: {raw}");
    let response = response_body(&raw);
    assert_eq!(response.message, api::upload::SUCCESS_MESSAGE);
    let data = response.data.expect("应该返回问答记录");
    assert_eq!(data[0].question, "What is Rust?");

    // 没有文件字段
    let body = format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"note\"\r\n\r\nhello\r\n--{boundary}--\r\n"
    );
    let raw = send_raw_request(addr, &content_type, &body).await;
    assert!(raw.starts_with("HTTP/1.1 400"), "unexpected response: {raw}");
    assert!(response_body(&raw).data.is_none());
}
