use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use chl_scrape::event::{Event, Faceoff, Penalty, Shot};
use chl_scrape::game_fetch::parse_pxp_json;
use chl_scrape::gamestate::annotate_events;
use chl_scrape::stats::{
    EmptyNetStats, EvenStrengthStats, GeneralStats, PenaltyShotStats, SkaterStats,
    SpecialTeamsStats, TeamLineups, populate_lineups,
};

/// A busy synthetic game: a faceoff and two shots every minute, a minor
/// every five minutes alternating sides.
fn synthetic_game() -> Vec<Event> {
    let mut events = Vec::new();
    for minute in 0..60u32 {
        let t = minute * 60;
        let home = minute % 2 == 0;
        events.push(Event::Faceoff(Faceoff {
            time: t,
            home_won: home,
            home_player_id: 100 + minute % 12,
            visitor_player_id: 200 + minute % 12,
        }));
        events.push(Event::Shot(Shot {
            time: t + 15,
            is_home: home,
            player_id: if home { 100 + minute % 12 } else { 200 + minute % 12 },
            is_goal: minute % 17 == 0,
        }));
        events.push(Event::Shot(Shot {
            time: t + 40,
            is_home: !home,
            player_id: if home { 200 + minute % 12 } else { 100 + minute % 12 },
            is_goal: false,
        }));
        if minute % 5 == 4 {
            events.push(Event::Penalty(Penalty {
                time: t + 50,
                is_home: home,
                player_id: if home { 100 + minute % 12 } else { 200 + minute % 12 },
                player_served: if home { 100 + minute % 12 } else { 200 + minute % 12 },
                duration_secs: 120,
            }));
        }
    }
    events
}

fn zeroed_skater(player_id: u32, team_code: &str) -> SkaterStats {
    SkaterStats {
        player_id,
        person_id: player_id,
        team_code: team_code.to_string(),
        position: "C".to_string(),
        general: GeneralStats::default(),
        even_strength: EvenStrengthStats::default(),
        powerplay: SpecialTeamsStats::default(),
        shorthanded: SpecialTeamsStats::default(),
        empty_net: EmptyNetStats::default(),
        penalty_shot: PenaltyShotStats::default(),
    }
}

fn bench_annotate(c: &mut Criterion) {
    let events = synthetic_game();
    c.bench_function("annotate_events", |b| {
        b.iter(|| {
            let annotated = annotate_events(black_box(&events)).unwrap();
            black_box(annotated.faceoffs.len());
        })
    });
}

fn bench_aggregate(c: &mut Criterion) {
    let events = synthetic_game();
    let annotated = annotate_events(&events).unwrap();
    let template = TeamLineups {
        home: (100..112).map(|id| zeroed_skater(id, "BAR")).collect(),
        visitor: (200..212).map(|id| zeroed_skater(id, "OTT")).collect(),
    };
    c.bench_function("populate_lineups", |b| {
        b.iter(|| {
            let mut lineups = template.clone();
            populate_lineups(&mut lineups, black_box(&[]), black_box(&annotated));
            black_box(lineups.home.len());
        })
    });
}

fn bench_pxp_parse(c: &mut Criterion) {
    c.bench_function("pxp_parse", |b| {
        b.iter(|| {
            let rows = parse_pxp_json(black_box(PXP_JSON)).unwrap();
            black_box(rows.len());
        })
    });
}

criterion_group!(engine, bench_annotate, bench_aggregate, bench_pxp_parse);
criterion_main!(engine);

static PXP_JSON: &str = include_str!("../tests/fixtures/pxpverbose.json");
