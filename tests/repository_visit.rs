use chrono::{Duration, TimeZone, Utc};
use link_shortener::domain::entities::{NewLink, NewVisit};
use link_shortener::domain::repositories::{LinkRepository, VisitRepository, VisitorFingerprint};
use link_shortener::infrastructure::persistence::{PgLinkRepository, PgVisitRepository};
use sqlx::PgPool;
use std::sync::Arc;

async fn setup(pool: PgPool) -> (i64, PgVisitRepository, Arc<PgPool>) {
    let pool = Arc::new(pool);
    let links = PgLinkRepository::new(pool.clone());
    let link = links
        .create(NewLink {
            url: "https://example.com".to_string(),
            short_url: "visited".to_string(),
        })
        .await
        .unwrap();

    (link.id, PgVisitRepository::new(pool.clone()), pool)
}

fn visit(link_id: i64, ip: &str, ua: &str) -> NewVisit {
    NewVisit {
        link_id,
        ip_address: ip.to_string(),
        user_agent: ua.to_string(),
    }
}

#[sqlx::test]
async fn test_record_visit(pool: PgPool) {
    let (link_id, repo, _) = setup(pool).await;

    let recorded = repo
        .record(visit(link_id, "10.0.0.1", "curl/8.0"))
        .await
        .unwrap();

    assert_eq!(recorded.link_id, link_id);
    assert_eq!(recorded.ip_address, "10.0.0.1");
    assert_eq!(recorded.user_agent, "curl/8.0");
    assert_eq!(repo.count_by_link_id(link_id).await.unwrap(), 1);
    assert_eq!(repo.count_all().await.unwrap(), 1);
}

#[sqlx::test]
async fn test_record_visit_for_missing_link_fails(pool: PgPool) {
    let (link_id, repo, _) = setup(pool).await;

    let result = repo.record(visit(link_id + 1000, "10.0.0.1", "")).await;

    assert!(result.is_err());
}

#[sqlx::test]
async fn test_distinct_visitors_first_seen_order(pool: PgPool) {
    let (link_id, repo, _) = setup(pool).await;

    repo.record(visit(link_id, "10.0.0.2", "b")).await.unwrap();
    repo.record(visit(link_id, "10.0.0.1", "a")).await.unwrap();
    repo.record(visit(link_id, "10.0.0.2", "b")).await.unwrap();
    repo.record(visit(link_id, "10.0.0.2", "")).await.unwrap();

    let visitors = repo.distinct_visitors(link_id).await.unwrap();

    assert_eq!(
        visitors,
        vec![
            VisitorFingerprint::new("10.0.0.2", "b"),
            VisitorFingerprint::new("10.0.0.1", "a"),
            VisitorFingerprint::new("10.0.0.2", ""),
        ]
    );
    assert_eq!(repo.count_by_link_id(link_id).await.unwrap(), 4);
}

#[sqlx::test]
async fn test_timeline_cutoff(pool: PgPool) {
    let (link_id, repo, pool) = setup(pool).await;

    sqlx::query(
        "INSERT INTO visits (link_id, ip_address, user_agent, created_at) VALUES ($1, $2, $3, $4)",
    )
    .bind(link_id)
    .bind("10.0.0.1")
    .bind("old")
    .bind(Utc::now() - Duration::days(3))
    .execute(pool.as_ref())
    .await
    .unwrap();
    repo.record(visit(link_id, "10.0.0.2", "new")).await.unwrap();

    let all = repo.timeline(link_id, None).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].user_agent, "old");

    let recent = repo
        .timeline(link_id, Some(Utc::now() - Duration::days(1)))
        .await
        .unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].user_agent, "new");
}

#[sqlx::test]
async fn test_find_by_visitor(pool: PgPool) {
    let (link_id, repo, _) = setup(pool).await;

    repo.record(visit(link_id, "10.0.0.1", "a")).await.unwrap();
    repo.record(visit(link_id, "10.0.0.1", "b")).await.unwrap();
    repo.record(visit(link_id, "10.0.0.1", "a")).await.unwrap();

    let found = repo.find_by_visitor(link_id, "10.0.0.1", "a").await.unwrap();
    assert_eq!(found.len(), 2);

    let none = repo.find_by_visitor(link_id, "10.0.0.9", "a").await.unwrap();
    assert!(none.is_empty());
}

#[sqlx::test]
async fn test_timeline_includes_visit_at_cutoff(pool: PgPool) {
    let (link_id, repo, pool) = setup(pool).await;
    let cutoff = Utc.with_ymd_and_hms(2024, 6, 14, 12, 0, 0).unwrap();

    for (ua, created_at) in [
        ("after", cutoff + Duration::hours(3)),
        ("before", cutoff - Duration::seconds(1)),
        ("boundary", cutoff),
    ] {
        sqlx::query(
            "INSERT INTO visits (link_id, ip_address, user_agent, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(link_id)
        .bind("10.0.0.1")
        .bind(ua)
        .bind(created_at)
        .execute(pool.as_ref())
        .await
        .unwrap();
    }

    let visits = repo.timeline(link_id, Some(cutoff)).await.unwrap();

    let agents: Vec<&str> = visits.iter().map(|v| v.user_agent.as_str()).collect();
    assert_eq!(agents, vec!["boundary", "after"]);
    assert_eq!(visits[0].created_at, cutoff);
}
