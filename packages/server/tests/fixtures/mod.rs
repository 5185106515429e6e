//! Shared integration-test fixtures.
#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use campuslink_server::{
    domain::{AuthUser, StudentProfile, UserId},
    infrastructure::repository::{
        InMemoryCallRequestRepository, InMemoryIdentityProvider, InMemoryStudentDirectory,
    },
    ui::state::AppState,
};

/// Bearer token of the seeded recruiter (`recruiter-1`)
pub const RECRUITER_TOKEN: &str = "recruiter-token";
/// Bearer token of the seeded college account (`college-1`)
pub const COLLEGE_TOKEN: &str = "college-token";
/// Bearer token of invited student `student-1`
pub const STUDENT_1_TOKEN: &str = "student-1-token";
/// Bearer token of invited student `student-2`
pub const STUDENT_2_TOKEN: &str = "student-2-token";
/// Bearer token of `student-3`, never invited to anything
pub const STUDENT_3_TOKEN: &str = "student-3-token";

/// A server instance bound to a fixed port with a seeded identity set.
pub struct TestServer {
    port: u16,
}

impl TestServer {
    /// Spawn the server on the given port and wait until it accepts
    /// connections.
    pub async fn start(port: u16) -> Self {
        let identities = Arc::new(InMemoryIdentityProvider::new());
        identities
            .register(RECRUITER_TOKEN, AuthUser::recruiter(user("recruiter-1")))
            .await;
        identities
            .register(
                COLLEGE_TOKEN,
                AuthUser::college(user("college-1"), user("college-1")),
            )
            .await;
        identities
            .register(STUDENT_1_TOKEN, AuthUser::student(user("student-1")))
            .await;
        identities
            .register(STUDENT_2_TOKEN, AuthUser::student(user("student-2")))
            .await;
        identities
            .register(STUDENT_3_TOKEN, AuthUser::student(user("student-3")))
            .await;

        let directory = InMemoryStudentDirectory::new(vec![
            student("Asha Verma", "CSE-2021-014", "IIT Delhi"),
            student("Ravi Kumar", "ECE-2021-037", "IIT Delhi"),
        ]);

        let state = AppState::new(
            Arc::new(InMemoryCallRequestRepository::new()),
            Arc::new(directory),
            identities,
        );

        let addr: SocketAddr = ([127, 0, 0, 1], port).into();
        tokio::spawn(async move {
            if let Err(e) = campuslink_server::run(addr, state).await {
                eprintln!("test server error: {e}");
            }
        });

        for _ in 0..100 {
            if tokio::net::TcpStream::connect(addr).await.is_ok() {
                return Self { port };
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("test server on port {port} did not come up");
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    pub fn api_url(&self) -> String {
        format!("{}/api/request-video-call", self.base_url())
    }

    pub fn ws_url(&self) -> String {
        format!("ws://127.0.0.1:{}/ws", self.port)
    }
}

fn user(id: &str) -> UserId {
    UserId::new(id.to_string()).expect("valid test user id")
}

fn student(name: &str, roll: &str, college: &str) -> StudentProfile {
    StudentProfile {
        name: name.to_string(),
        email: format!(
            "{}@example.edu",
            name.to_lowercase().replace(' ', ".")
        ),
        roll_number: roll.to_string(),
        course: "B.Tech".to_string(),
        college: college.to_string(),
    }
}
