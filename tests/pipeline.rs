use std::collections::HashMap;

use anyhow::{anyhow, Result};

use club_ranking::config::RunConfig;
use club_ranking::database::{create_memory_pool, get_connection, participations, players, podiums};
use club_ranking::domain::{Period, RawRow, RosterEntry, Stage};
use club_ranking::fetchers::RowSource;
use club_ranking::services::{ExportService, ParticipationService, RankingService};

struct ScriptedSource {
    pages: HashMap<String, Vec<RawRow>>,
}

impl RowSource for ScriptedSource {
    async fn fetch_rows(&mut self, player_id: &str) -> Result<Vec<RawRow>> {
        self.pages
            .get(player_id)
            .cloned()
            .ok_or_else(|| anyhow!("navigation timeout for {}", player_id))
    }
}

/// Builds a history page from (date, tournament, [(label, champion_row)]) blocks.
fn history(player: &str, blocks: &[(&str, &str, Vec<(&str, bool)>)]) -> Vec<RawRow> {
    let mut rows = Vec::new();
    for (date, tournament, results) in blocks {
        rows.push(RawRow {
            index: rows.len(),
            is_header: true,
            header_text: Some(format!("{} - {}", date, tournament)),
            tournament_name: Some(tournament.to_string()),
            ..RawRow::default()
        });
        for (label, champion) in results.iter() {
            rows.push(RawRow {
                index: rows.len(),
                label: Some(label.to_string()),
                ..RawRow::default()
            });
            rows.push(RawRow {
                index: rows.len(),
                is_champion_result: *champion,
                player_codes: vec![player.to_string(), "777".to_string()],
                ..RawRow::default()
            });
        }
    }
    rows
}

fn member(id: &str, name: &str, active: bool) -> RosterEntry {
    RosterEntry {
        player_id: id.to_string(),
        name: name.to_string(),
        active,
        category: "5º".to_string(),
    }
}

#[tokio::test]
async fn test_full_pipeline_with_partial_failure() {
    let pool = create_memory_pool().unwrap();
    let mut conn = get_connection(&pool).unwrap();
    players::sync(
        &mut conn,
        &[member("16118", "Ana", true), member("2001", "Bruno", false), member("3002", "Caro", true)],
    )
    .unwrap();

    let pages = HashMap::from([
        (
            "16118".to_string(),
            history(
                "16118",
                &[
                    ("03/01/2026", "Copa Reyes", vec![("Primera | Grupo 1", false)]),
                    (
                        "17/01/2026",
                        "Abierto Enero",
                        vec![("Primera | Grupo 3", false), ("Primera | Semifinal", false)],
                    ),
                    ("20/11/2025", "Torneo Viejo", vec![("Primera | Final", true)]),
                ],
            ),
        ),
        (
            "2001".to_string(),
            history(
                "2001",
                &[("17/01/2026", "Abierto Enero", vec![("Segunda | 4tos de final", false), ("Segunda | Final", true)])],
            ),
        ),
    ]);
    let source = ScriptedSource { pages };

    let january = Period::new(1, 2026).unwrap();
    let run = RunConfig::with_periods(vec![january, january.previous()]);
    let mut service = ParticipationService::new(source, run);

    let player_ids = players::list_ids(&mut conn).unwrap();
    let summary = service.run(&mut conn, &player_ids).await.unwrap();

    assert_eq!(summary.players, 3);
    assert_eq!(summary.failed_players, 1);
    assert_eq!(summary.appended, 3);

    let ledger = participations::list_all(&mut conn).unwrap();
    let stages: Vec<(&str, &str, Stage)> = ledger
        .iter()
        .map(|r| (r.player_id.as_str(), r.tournament.as_str(), r.stage.clone()))
        .collect();
    assert_eq!(
        stages,
        vec![
            ("16118", "Copa Reyes", Stage::GroupStage),
            ("16118", "Abierto Enero", Stage::SemiFinal),
            ("2001", "Abierto Enero", Stage::Champion),
        ]
    );

    let (ranking, podium_entries) = RankingService::new().run(&mut conn).unwrap();
    assert_eq!(ranking.len(), 2);
    assert_eq!(ranking.iter().find(|e| e.player_id == "16118").unwrap().total_points, 22);

    let top: Vec<(u32, &str, u32)> = podium_entries
        .iter()
        .map(|p| (p.rank, p.player_id.as_str(), p.total_points))
        .collect();
    assert_eq!(top, vec![(1, "2001", 50), (2, "16118", 22)]);
    assert_eq!(podiums::list_all(&mut conn).unwrap(), podium_entries);

    let board = ExportService::new(january).snapshot(&mut conn).unwrap();
    assert_eq!(board.current_ranking[0].name, "Bruno");
    assert_eq!(board.current_ranking[1].position, 2);
    let active: Vec<&str> = board.players.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(active, vec!["Ana", "Caro"]);
}

#[tokio::test]
async fn test_second_run_appends_nothing_new() {
    let pool = create_memory_pool().unwrap();
    let mut conn = get_connection(&pool).unwrap();

    let page = history("16118", &[("17/01/2026", "Abierto Enero", vec![("Primera | 8vos de final", false)])]);
    let source = ScriptedSource {
        pages: HashMap::from([("16118".to_string(), page)]),
    };
    let run = RunConfig::with_periods(vec![Period::new(1, 2026).unwrap()]);
    let mut service = ParticipationService::new(source, run);
    let player_ids = vec!["16118".to_string()];

    let first = service.run(&mut conn, &player_ids).await.unwrap();
    let second = service.run(&mut conn, &player_ids).await.unwrap();

    assert_eq!(first.appended, 1);
    assert_eq!(second.appended, 0);
    assert_eq!(second.removed_duplicates, 0);

    let ledger = participations::list_all(&mut conn).unwrap();
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger[0].points, 8);
}
