//! End-to-end session flow on the public API.

use moodforge_core::{FixedRegion, Mood, RegionCode};
use moodforge_engine::{RequestStatus, RewardPhase, Session, SessionConfig};
use moodforge_provider::ProviderConfig;

fn simulated_session(starting_credits: i64) -> Session {
    Session::new(SessionConfig {
        starting_credits,
        provider: ProviderConfig::default(),
        detector: Box::new(FixedRegion(RegionCode::In)),
    })
}

#[tokio::test(start_paused = true)]
async fn spend_earn_spend_cycle() {
    let session = simulated_session(1);

    // Spend the only credit.
    let outcome = session.generate(vec![0u8; 8], Mood::Shock).await.unwrap();
    assert!(outcome.simulated);
    assert_eq!(session.account().credits, 0);
    assert_eq!(session.account().xp, 50);
    assert_eq!(session.generation_status(), RequestStatus::Succeeded);

    // Broke: the next attempt fails cleanly.
    let err = session.generate(vec![0u8; 8], Mood::Shock).await.unwrap_err();
    assert!(err.is_insufficient_credits());

    // Watch an ad to completion for +2.
    session.watch_ad();
    assert_eq!(session.reward_phase(), RewardPhase::Counting);
    tokio::time::sleep(std::time::Duration::from_millis(5100)).await;
    assert_eq!(session.reward_phase(), RewardPhase::Rewarded);
    assert_eq!(session.account().credits, 2);

    // Solvent again.
    let outcome = session.generate(vec![0u8; 8], Mood::Laugh).await.unwrap();
    assert_eq!(outcome.balance, 1);
    assert_eq!(outcome.xp, 100);
}

#[tokio::test(start_paused = true)]
async fn pricing_is_available_while_generation_is_idle_or_busy() {
    let session = simulated_session(5);

    let tier = session.pricing_tier();
    assert_eq!(tier.symbol, "₹");
    assert_eq!(tier.currency, "INR");

    // Pricing stays usable regardless of generation state.
    session.generate(vec![0u8; 8], Mood::Anger).await.unwrap();
    assert_eq!(session.pricing_tier().currency, "INR");
}

#[tokio::test(start_paused = true)]
async fn cancelled_ad_forfeits_and_leaves_generation_untouched() {
    let session = simulated_session(2);

    session.watch_ad();
    tokio::time::sleep(std::time::Duration::from_millis(2100)).await;
    assert!(session.cancel_ad());
    assert_eq!(session.reward_phase(), RewardPhase::Idle);
    assert_eq!(session.account().credits, 2);

    let outcome = session.generate(vec![0u8; 8], Mood::Fear).await.unwrap();
    assert_eq!(outcome.balance, 1);
}
