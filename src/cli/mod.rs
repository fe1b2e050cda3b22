//! CLI 모듈
//!
//! ugc-concept CLI 명령어 정의 및 구현

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::concept::UgcConcept;
use crate::config::{AppConfig, GeneratorConfig};
use crate::scraper::ProductScraper;
use crate::server;
use crate::service::{parse_product_url, ConceptService};

// ============================================================================
// CLI Definition
// ============================================================================

#[derive(Parser)]
#[command(name = "ugc-concept")]
#[command(version, about = "제품 URL로 UGC 숏폼 광고 컨셉 생성", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// HTTP 서버 실행
    Serve {
        /// 바인드 주소 (기본: HOST 또는 0.0.0.0)
        #[arg(long)]
        host: Option<String>,

        /// 바인드 포트 (기본: PORT 또는 3000)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// 제품 페이지 메타데이터만 추출
    Scrape {
        /// 제품 URL
        url: String,
    },

    /// 제품 URL로 컨셉 생성
    Generate {
        /// 제품 URL
        url: String,

        /// 제품 이름 (스크랩된 제목 대신 사용)
        #[arg(short, long)]
        name: Option<String>,

        /// JSON 으로 출력
        #[arg(long)]
        json: bool,
    },

    /// 상태 확인
    Status,
}

// ============================================================================
// CLI Runner
// ============================================================================

/// CLI 명령어 실행
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Serve { host, port } => cmd_serve(host, port).await,
        Commands::Scrape { url } => cmd_scrape(&url).await,
        Commands::Generate { url, name, json } => cmd_generate(&url, name.as_deref(), json).await,
        Commands::Status => cmd_status(),
    }
}

// ============================================================================
// Command Implementations
// ============================================================================

/// 서버 실행 명령어 (serve)
async fn cmd_serve(host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut config = AppConfig::from_env().context("설정 로드 실패")?;

    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    server::serve(config).await
}

/// 메타데이터 추출 명령어 (scrape)
async fn cmd_scrape(url: &str) -> Result<()> {
    let url = parse_product_url(Some(url))?;
    let scraper = ProductScraper::new().context("ProductScraper 생성 실패")?;

    println!("[*] URL 스크래핑 중: {}", url);

    let product = scraper.scrape(&url).await?;

    println!("[OK] 추출 완료");
    println!("     제목: {}", product.title);
    println!("     설명: {}", product.description);
    println!(
        "     이미지: {}",
        product.image.as_deref().unwrap_or("(없음)")
    );

    Ok(())
}

/// 컨셉 생성 명령어 (generate)
async fn cmd_generate(url: &str, name: Option<&str>, json: bool) -> Result<()> {
    let config = AppConfig::from_env().context("설정 로드 실패")?;
    let service =
        ConceptService::from_config(&config.generator).context("ConceptService 생성 실패")?;

    if !json {
        println!("[*] 컨셉 생성 중: {}", url);
        if !service.has_backend() {
            println!("[!] OPENAI_API_KEY 미설정 - 템플릿 컨셉을 사용합니다.");
        }
    }

    let concept = service.handle_generate(Some(url), name).await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&concept).context("JSON 직렬화 실패")?
        );
    } else {
        print!("{}", render_concept(&concept));
    }

    Ok(())
}

/// 상태 확인 명령어 (status)
fn cmd_status() -> Result<()> {
    let _ = dotenvy::dotenv();
    let generator = GeneratorConfig::from_env();

    println!("ugc-concept v{}", env!("CARGO_PKG_VERSION"));
    println!();

    if generator.api_key.is_some() {
        println!("[OK] 생성 백엔드: OpenAI ({})", generator.model);
        println!("     엔드포인트: {}/chat/completions", generator.base_url);
    } else {
        println!("[!] 생성 백엔드 없음 - 템플릿 컨셉 사용");
        println!("    설정 방법: export OPENAI_API_KEY=your-api-key");
    }

    Ok(())
}

// ============================================================================
// Rendering
// ============================================================================

/// 컨셉을 터미널용 텍스트로 렌더링
pub fn render_concept(concept: &UgcConcept) -> String {
    let mut out = String::new();
    let rule = "─".repeat(61);

    out.push_str(&format!("{rule}\n# {}\n{rule}\n", concept.product.title));
    out.push_str(&format!("URL   : {}\n", concept.product.url));
    if let Some(image) = &concept.product.image {
        out.push_str(&format!("Image : {}\n", image));
    }
    out.push_str(&format!("> {}\n\n", concept.product.description));

    out.push_str(&format!("## Hook\n{}\n\n", concept.hook));
    out.push_str(&format!("## UGC Script\n{}\n\n", concept.script));

    out.push_str("## Scene Breakdown\n");
    for scene in &concept.scenes {
        out.push_str(&format!("Scene {}\n", scene.index));
        out.push_str(&format!("  Visual    : {}\n", scene.visual));
        out.push_str(&format!("  Direction : {}\n", scene.direction));
        out.push_str(&format!("  Voiceover : {}\n", scene.voiceover));
    }
    out.push('\n');

    out.push_str(&format!("## Voiceover\n{}\n\n", concept.voiceover));
    out.push_str(&format!("## CTA\n{}\n", concept.call_to_action));

    out
}
