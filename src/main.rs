use forwarding_gateway::{
    logging,
    server::{self, GatewayServer},
    settings::Settings,
};
use tracing::{error, info};

async fn serve(settings: &Settings) -> server::Result<()> {
    let server = GatewayServer::bind(settings).await?;

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "종료 신호 대기 실패");
            std::future::pending::<()>().await;
        }
    };

    server.run_until(shutdown).await
}

#[tokio::main]
async fn main() {
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("설정 로드 실패: {}", e);
            std::process::exit(1);
        }
    };

    let guard = match logging::init_logging(&settings.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("로깅 초기화 실패: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = serve(&settings).await {
        error!(error = %e, "서버 실행 실패");
        // 비동기 writer에 남은 로그를 비운 뒤 종료
        drop(guard);
        std::process::exit(1);
    }

    info!("서버 종료");
}
