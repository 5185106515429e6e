//! CampusLink coordination server.
//!
//! Serves the video-call request lifecycle API and the WebRTC signaling
//! relay over one listener.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin campuslink-server -- --seed-demo
//! ```

use std::{net::SocketAddr, sync::Arc};

use clap::Parser;

use campuslink_server::{
    domain::{AuthUser, StudentProfile, UserId},
    infrastructure::repository::{
        InMemoryCallRequestRepository, InMemoryIdentityProvider, InMemoryStudentDirectory,
    },
    ui::state::AppState,
};
use campuslink_shared::logger::setup_logger;

#[derive(Debug, Parser)]
#[command(name = "campuslink-server", about = "CampusLink coordination server")]
struct Args {
    /// Bind address
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Bind port
    #[arg(long, default_value_t = 3001)]
    port: u16,

    /// Register a demo identity/token set and a demo student directory.
    /// Token issuance is otherwise the identity collaborator's concern.
    #[arg(long, default_value_t = false)]
    seed_demo: bool,
}

async fn seed_demo(identities: &InMemoryIdentityProvider) -> Vec<StudentProfile> {
    let recruiter = UserId::new("recruiter-acme".to_string());
    let college = UserId::new("college-iit-delhi".to_string());
    let asha = UserId::new("student-asha".to_string());
    let ravi = UserId::new("student-ravi".to_string());

    if let (Ok(recruiter), Ok(college), Ok(asha), Ok(ravi)) = (recruiter, college, asha, ravi) {
        identities
            .register("demo-recruiter", AuthUser::recruiter(recruiter))
            .await;
        identities
            .register("demo-college", AuthUser::college(college.clone(), college))
            .await;
        identities
            .register("demo-student-asha", AuthUser::student(asha))
            .await;
        identities
            .register("demo-student-ravi", AuthUser::student(ravi))
            .await;
        tracing::info!(
            "Seeded demo tokens: demo-recruiter, demo-college, demo-student-asha, demo-student-ravi"
        );
    }

    vec![
        StudentProfile {
            name: "Asha Verma".to_string(),
            email: "asha.verma@example.edu".to_string(),
            roll_number: "CSE-2021-014".to_string(),
            course: "B.Tech CSE".to_string(),
            college: "IIT Delhi".to_string(),
        },
        StudentProfile {
            name: "Ravi Kumar".to_string(),
            email: "ravi.kumar@example.edu".to_string(),
            roll_number: "ECE-2021-037".to_string(),
            course: "B.Tech ECE".to_string(),
            college: "IIT Delhi".to_string(),
        },
    ]
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    let identities = Arc::new(InMemoryIdentityProvider::new());
    let students = if args.seed_demo {
        seed_demo(&identities).await
    } else {
        Vec::new()
    };

    let state = AppState::new(
        Arc::new(InMemoryCallRequestRepository::new()),
        Arc::new(InMemoryStudentDirectory::new(students)),
        identities,
    );

    let addr: SocketAddr = match format!("{}:{}", args.host, args.port).parse() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!("Invalid bind address: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = campuslink_server::run(addr, state).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
