//! Development seed: demo users, sample bounties, and submissions.
//!
//! Prints the demo user's raw API token; pass it as a bearer token to hit
//! the authenticated endpoints.

use bb_auth_token::hash_token;
use bb_core::models::{
    Bounty, BountyCategory, BountyStatus, Submission, SubmissionStatus, User,
    DEFAULT_REWARD_CURRENCY,
};
use bb_core::traits::BountyRepo;
use bb_db_sqlite::SqliteBountyRepo;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

struct BountyFixture {
    title: &'static str,
    description: &'static str,
    reward: f64,
    category: BountyCategory,
    project: &'static str,
    due_in_hours: i64,
    progress: i64,
    tags: &'static [&'static str],
}

const BOUNTIES: &[BountyFixture] = &[
    BountyFixture {
        title: "Aptos Finance - UI Design Review",
        description: "Review and provide feedback on the new Aptos Finance UI design. \
                      Focus on user experience and accessibility.",
        reward: 100.0,
        category: BountyCategory::Design,
        project: "APTOS FINANCE",
        due_in_hours: 48,
        progress: 65,
        tags: &["Design", "UI/UX"],
    },
    BountyFixture {
        title: "Create a video about Petra Wallet",
        description: "Create an engaging video showcasing Petra Wallet features and \
                      benefits for the Aptos ecosystem.",
        reward: 200.0,
        category: BountyCategory::Video,
        project: "PETRA WALLET",
        due_in_hours: 72,
        progress: 40,
        tags: &["Video", "Marketing"],
    },
    BountyFixture {
        title: "Write a thread about Hyperion on X",
        description: "Create an informative Twitter thread about Hyperion protocol and \
                      its benefits for the Aptos ecosystem.",
        reward: 20.0,
        category: BountyCategory::Content,
        project: "HYPERION",
        due_in_hours: 12,
        progress: 85,
        tags: &["Content", "Social"],
    },
    BountyFixture {
        title: "PACT gives Memecoin Traders superpowers",
        description: "Develop smart contracts and tools for PACT protocol to enhance \
                      memecoin trading capabilities.",
        reward: 1.0,
        category: BountyCategory::Development,
        project: "PACT",
        due_in_hours: 120,
        progress: 25,
        tags: &["Development", "DeFi"],
    },
    BountyFixture {
        title: "Threadstorming Thala: Tweet Like a Pro",
        description: "Create viral Twitter content about Thala protocol and its \
                      innovative DeFi solutions.",
        reward: 250.0,
        category: BountyCategory::Social,
        project: "THALA",
        due_in_hours: 168,
        progress: 15,
        tags: &["Social", "Community"],
    },
    BountyFixture {
        title: "Write a thread about Aptos Learn on X",
        description: "Create educational content about Aptos Learn platform and its \
                      resources for developers.",
        reward: 15.0,
        category: BountyCategory::Educational,
        project: "APTOS LEARN",
        due_in_hours: 96,
        progress: 70,
        tags: &["Educational", "Content"],
    },
];

fn user(email: &str, username: &str, wallet: Option<&str>, earnings: f64) -> User {
    User {
        id: Uuid::now_v7(),
        email: email.to_string(),
        username: username.to_string(),
        avatar: None,
        wallet_address: wallet.map(str::to_string),
        earnings,
        created_at: Utc::now(),
    }
}

fn bounty(fixture: &BountyFixture, creator_id: Uuid, now: DateTime<Utc>) -> Bounty {
    Bounty {
        id: Uuid::now_v7(),
        title: fixture.title.to_string(),
        description: fixture.description.to_string(),
        reward: fixture.reward,
        reward_currency: DEFAULT_REWARD_CURRENCY.to_string(),
        category: fixture.category,
        project: fixture.project.to_string(),
        status: BountyStatus::Open,
        due_date: Some(now + Duration::hours(fixture.due_in_hours)),
        progress: fixture.progress,
        tags: fixture.tags.iter().map(|tag| tag.to_string()).collect(),
        creator_id,
        created_at: now,
    }
}

fn submission(bounty_id: Uuid, user_id: Uuid, content: &str, status: SubmissionStatus) -> Submission {
    Submission {
        id: Uuid::now_v7(),
        bounty_id,
        user_id,
        content: content.to_string(),
        status,
        created_at: Utc::now(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:bounty_board.db".to_string());
    let repo = SqliteBountyRepo::new(&database_url).await?;

    // Demo user, with the token the authenticated endpoints expect.
    let demo_token = Uuid::new_v4().simple().to_string();
    let demo = user(
        "demo@example.com",
        "demo_user",
        Some("0x1234567890123456789012345678901234567890"),
        19.0,
    );
    repo.create_user(demo.clone(), Some(hash_token(&demo_token)))
        .await?;

    // A couple of earners so the leaderboard is not a single row.
    let alice = user("alice@example.com", "alice", None, 2500.0);
    let bob = user("bob@example.com", "bob", None, 1800.0);
    repo.create_user(alice.clone(), None).await?;
    repo.create_user(bob.clone(), None).await?;

    let now = Utc::now();
    let mut created = Vec::with_capacity(BOUNTIES.len());
    for fixture in BOUNTIES {
        created.push(repo.create_bounty(bounty(fixture, demo.id, now)).await?);
    }

    repo.create_submission(submission(
        created[0].bounty.id,
        alice.id,
        "I have completed the UI design review for Aptos Finance. \
         Here are my findings and recommendations...",
        SubmissionStatus::Approved,
    ))
    .await?;
    repo.create_submission(submission(
        created[1].bounty.id,
        bob.id,
        "Working on the Petra Wallet video. Here is my progress update...",
        SubmissionStatus::Pending,
    ))
    .await?;
    repo.create_submission(submission(
        created[3].bounty.id,
        demo.id,
        "Smart contract development for PACT protocol is in progress...",
        SubmissionStatus::Pending,
    ))
    .await?;

    println!("Seeded {} bounties and 3 submissions.", created.len());
    println!("Demo API token: {demo_token}");
    Ok(())
}
