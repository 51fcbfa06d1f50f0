use soriamap_core::view::list::{build_rows, render_list_html, EMPTY_LIST_MESSAGE};
use soriamap_core::{Category, CategoryFilter, Poi, PoiRepository};

fn seeded_repo() -> PoiRepository {
    PoiRepository::from_pois(vec![
        Poi::with_id(
            "1",
            "2025-03-01T08:00:00.000Z",
            "Semáforo averiado",
            "en la rotonda norte",
            Category::Signal,
            41.77,
            -2.47,
        ),
        Poi::with_id(
            "2",
            "2025-03-03T08:00:00.000Z",
            "Bache grande",
            "",
            Category::Pothole,
            41.76,
            -2.46,
        ),
        Poi::with_id(
            "3",
            "2025-03-02T08:00:00.000Z",
            "Obra en la calzada",
            "corte parcial",
            Category::Roadwork,
            41.75,
            -2.45,
        ),
        Poi::with_id(
            "4",
            "2025-03-04T08:00:00.000Z",
            "Otro aviso",
            "zona del BACHE viejo",
            Category::Other,
            41.74,
            -2.44,
        ),
    ])
}

#[test]
fn empty_term_and_all_returns_everything_newest_first() {
    let repo = seeded_repo();
    let ids: Vec<&str> = repo
        .filter("", CategoryFilter::All)
        .into_iter()
        .map(|poi| poi.id.as_str())
        .collect();
    assert_eq!(ids, vec!["4", "2", "3", "1"]);
}

#[test]
fn search_matches_name_or_description_case_insensitively() {
    let repo = seeded_repo();

    let by_name: Vec<&str> = repo
        .filter("BACHE", CategoryFilter::All)
        .into_iter()
        .map(|poi| poi.id.as_str())
        .collect();
    // "bache" appears in poi 2's name and poi 4's description.
    assert_eq!(by_name, vec!["4", "2"]);

    let by_description: Vec<&str> = repo
        .filter("rotonda", CategoryFilter::All)
        .into_iter()
        .map(|poi| poi.id.as_str())
        .collect();
    assert_eq!(by_description, vec!["1"]);
}

#[test]
fn category_filter_never_leaks_other_categories() {
    let repo = seeded_repo();
    for category in Category::ALL {
        for poi in repo.filter("", CategoryFilter::Only(category)) {
            assert_eq!(poi.category, category);
        }
    }
}

#[test]
fn search_and_category_combine() {
    let repo = seeded_repo();
    let hits = repo.filter("bache", CategoryFilter::Only(Category::Pothole));
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "2");
}

#[test]
fn no_hits_render_the_empty_message() {
    let repo = seeded_repo();
    let rows = build_rows(&repo.filter("inexistente", CategoryFilter::All));
    assert!(rows.is_empty());
    assert!(render_list_html(&rows).contains(EMPTY_LIST_MESSAGE));
}

#[test]
fn rendered_list_keeps_order_and_shows_dates() {
    let repo = seeded_repo();
    let rows = build_rows(&repo.filter("", CategoryFilter::All));
    let html = render_list_html(&rows);

    assert_eq!(rows[0].display_date, "04/03/2025");
    let newest = html.find("Otro aviso").unwrap();
    let oldest = html.find("Semáforo averiado").unwrap();
    assert!(newest < oldest);
    assert!(html.contains("data-poi-id=\"2\""));
    assert!(html.contains("🕳️"));
}
