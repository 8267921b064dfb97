use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use snf_power_toolbox::app::{self, Task};
use snf_power_toolbox::config;
use tracing_subscriber::EnvFilter;

/// 사용후핵연료 붕괴열과 랭킨 사이클 효율 스터디 도구.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// 설정 파일 경로. 없으면 기본 설정으로 생성한다.
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// 설정 파일의 출력 디렉터리를 대체한다.
    #[arg(long)]
    out_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Copy, Subcommand)]
enum Command {
    /// 붕괴열 프로파일 생성
    Profile,
    /// 기준 로트의 집중 붕괴열
    Lot,
    /// 체류 시간 스터디
    Residence,
    /// 단일 랭킨 사이클 평가
    Cycle,
    /// 유량 × 중간단 압력 스터디
    Study,
    /// 모든 작업 실행 (기본값)
    All,
}

impl From<Command> for Task {
    fn from(command: Command) -> Self {
        match command {
            Command::Profile => Task::Profiles,
            Command::Lot => Task::Lot,
            Command::Residence => Task::Residence,
            Command::Cycle => Task::Cycle,
            Command::Study => Task::Studies,
            Command::All => Task::All,
        }
    }
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 요청된 작업을 실행한다.
fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match try_run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("오류: {err}");
            ExitCode::FAILURE
        }
    }
}

fn try_run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut cfg = config::load_or_default(&cli.config)?;
    if let Some(out_dir) = cli.out_dir {
        cfg.output_dir = out_dir;
    }
    let task = cli.command.map_or(Task::All, Task::from);
    app::run(&cfg, task)?;
    Ok(())
}
