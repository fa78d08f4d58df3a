use std::time::Duration;

use parlay_desk::analysis::{MockBetParser, Recommender, SlipAnalyzer, StaticRecommender};
use parlay_desk::slip::PlaceError;
use parlay_desk::{LegEdit, Quote, Session, SlipError, SlipState};

#[tokio::test]
async fn parsed_slip_goes_from_empty_to_placed() {
    let parser = MockBetParser::new(Duration::ZERO);
    let mut session = Session::new(5000.0).unwrap();
    assert_eq!(session.state(), SlipState::Empty);

    let analysis = parser
        .analyze("2-leg parlay: Warriors -2.5 @ -110, Cowboys ML @ +165")
        .await
        .unwrap();
    session.append_legs(analysis.legs);
    assert_eq!(session.state(), SlipState::Editable);

    session.set_stake(6000.0);
    assert_eq!(session.state(), SlipState::Blocked);
    assert_eq!(session.errors(), vec![SlipError::StakeExceedsBankroll]);

    session.set_stake(100.0);
    assert_eq!(session.state(), SlipState::Placeable);

    let placed = session.place().unwrap();
    assert_eq!(placed.combined_odds, 406);
    assert!((placed.payout.total_payout - 506.0).abs() < 1e-9);
    assert_eq!(session.bankroll(), 4900.0);
    assert_eq!(session.state(), SlipState::Empty);
}

#[test]
fn same_recommendation_twice_blocks_as_duplicate() {
    let recs = StaticRecommender.recommend();
    let mut session = Session::new(1000.0).unwrap();
    session.append_legs([recs[0].to_leg(1000.0), recs[0].to_leg(1000.0)]);
    session.set_stake(20.0);

    let legs = session.legs();
    assert_ne!(legs[0].id, legs[1].id);
    assert_eq!(legs[0].stake, Some(20.0));
    let id = legs[1].id.clone();

    assert_eq!(
        session.place().unwrap_err(),
        PlaceError::NotPlaceable(vec![SlipError::DuplicateSelections])
    );

    // editing one leg to a different selection clears the conflict
    let edit = LegEdit { selection: Some("Celtics -3.5".into()), ..LegEdit::default() };
    session.update_leg(&id, &edit).unwrap();
    assert_eq!(session.state(), SlipState::Placeable);
}

#[test]
fn quote_reflects_live_session() {
    let recs = StaticRecommender.recommend();
    let mut session = Session::new(1000.0).unwrap();
    session.append_legs(recs.iter().map(|r| r.to_leg(1000.0)));
    session.set_stake(75.0);

    let quote = Quote::from_snapshot(&session.snapshot(), 0.05);
    assert_eq!(quote.bet_type, "3-Leg Parlay");
    assert!(quote.placeable);
    assert_eq!(quote.warnings, vec!["Warning: Stake exceeds 5% of bankroll"]);
    assert!(quote.combined_odds.unwrap() > 0);
}
