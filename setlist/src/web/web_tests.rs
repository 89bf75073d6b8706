#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        Router,
        body::Body,
        http::{Method, Request, StatusCode, header},
    };
    use http_body_util::BodyExt;
    use tempfile::TempDir;
    use tower::ServiceExt;

    use crate::{
        config::Config,
        database::{DatabaseConnection, models::history::ArchiveHistory, testing::seeded_db},
        global::Global,
        web::{create_router, htmx::HX_REQUEST},
    };

    struct TestResponse {
        status: StatusCode,
        content_type: Option<String>,
        body: String,
    }

    async fn test_app() -> (TempDir, Router) {
        let (dir, database) = seeded_db().await;
        (dir, app_for(database).await)
    }

    async fn app_for(database: Arc<DatabaseConnection>) -> Router {
        let history = ArchiveHistory::load(&database).await.unwrap();
        let global = Arc::new(Global {
            config: Config::default(),
            database,
            history,
        });
        create_router(global)
    }

    /// Seeded archive plus a song with a reserved character in its title,
    /// played at every Fox Theatre show.
    async fn test_app_with_question_song() -> (TempDir, Router) {
        let (dir, database) = seeded_db().await;
        database
            .conn()
            .call(|c| {
                c.execute_batch(
                    r#"
                    INSERT INTO songs (id, title) VALUES (5, 'Who Do You Love?');
                    INSERT INTO sets (show_id, set_number)
                      SELECT id, 1 FROM shows WHERE venue = 'Fox Theatre';
                    INSERT INTO song_performances (set_id, order_in_set, song_id)
                      SELECT sets.id, 1, 5 FROM sets
                      JOIN shows ON shows.id = sets.show_id
                      WHERE shows.venue = 'Fox Theatre';
                    "#,
                )?;
                Ok(())
            })
            .await
            .unwrap();
        (dir, app_for(database).await)
    }

    async fn send(app: Router, request: Request<Body>) -> TestResponse {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        TestResponse {
            status,
            content_type,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    async fn get(app: Router, uri: &str) -> TestResponse {
        send(app, Request::get(uri).body(Body::empty()).unwrap()).await
    }

    async fn get_htmx(app: Router, uri: &str) -> TestResponse {
        let request = Request::get(uri).header(HX_REQUEST, "true").body(Body::empty()).unwrap();
        send(app, request).await
    }

    async fn search(app: Router, form: &'static str, htmx: bool) -> TestResponse {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri("/search")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if htmx {
            builder = builder.header(HX_REQUEST, "true");
        }
        send(app, builder.body(Body::from(form)).unwrap()).await
    }

    #[tokio::test]
    async fn test_home_page() {
        let (_dir, app) = test_app().await;

        let resp = get(app, "/").await;
        assert_eq!(resp.status, StatusCode::OK);
        assert!(resp.body.contains("<html"));
        assert!(resp.body.contains("<title>Grateful Dead Setlists</title>"));
        assert!(resp.body.contains("The Music Never Stopped"));
    }

    #[tokio::test]
    async fn test_htmx_request_gets_fragment() {
        let (_dir, app) = test_app().await;

        let resp = get_htmx(app.clone(), "/songs").await;
        assert_eq!(resp.status, StatusCode::OK);
        assert!(!resp.body.contains("<html"));
        assert!(resp.body.contains("<title>4 Songs</title>"));

        let resp = get(app, "/songs").await;
        assert!(resp.body.contains("<html"));
        assert!(resp.body.contains("<title>4 Songs</title>"));
    }

    #[tokio::test]
    async fn test_songs_page() {
        let (_dir, app) = test_app().await;

        let resp = get(app.clone(), "/songs").await;
        assert_eq!(resp.status, StatusCode::OK);
        assert!(resp.body.contains("Scarlet Begonias"));
        assert!(resp.body.contains("Fire on the Mountain"));
        assert!(resp.body.contains("Dark Star"));
        assert!(resp.body.contains("Page 1 of 1"));

        let resp = get(app, "/songs?max=2&offset=2").await;
        assert!(resp.body.contains("Page 2 of 2"));
        assert!(resp.body.contains("Scarlet Begonias"));
        assert!(resp.body.contains("Sugaree"));
        assert!(!resp.body.contains("Dark Star"));
    }

    #[tokio::test]
    async fn test_venues_page() {
        let (_dir, app) = test_app().await;

        let resp = get(app.clone(), "/venues").await;
        assert_eq!(resp.status, StatusCode::OK);
        assert!(resp.body.contains("<title>5 Venues</title>"));
        assert!(resp.body.contains("Wembley Empire Pool"));

        let resp = get(app, "/venues?max=2&offset=2").await;
        assert!(resp.body.contains("Page 2 of 3"));
        assert!(resp.body.contains("Memorial Coliseum"));
        assert!(!resp.body.contains("Barton Hall"));
    }

    #[tokio::test]
    async fn test_shows_at_venue() {
        let (_dir, app) = test_app().await;

        let resp = get(app, "/venue/Ithaca/Barton%20Hall").await;
        assert_eq!(resp.status, StatusCode::OK);
        assert!(resp.body.contains("<title>3 shows at Barton Hall in Ithaca</title>"));
        assert!(resp.body.contains("May 8, 1977"));
        assert!(resp.body.contains("May 16, 1981"));
    }

    #[tokio::test]
    async fn test_unknown_venue_is_not_found() {
        let (_dir, app) = test_app().await;

        let resp = get(app, "/venue/Ithaca/Nowhere").await;
        assert_eq!(resp.status, StatusCode::NOT_FOUND);
        assert!(resp.body.contains("No Shows Found At Nowhere In Ithaca"));
    }

    #[tokio::test]
    async fn test_shows_in_city() {
        let (_dir, app) = test_app().await;

        let resp = get(app.clone(), "/city/NY/Ithaca").await;
        assert_eq!(resp.status, StatusCode::OK);
        assert!(resp.body.contains("<title>3 Shows In Ithaca</title>"));

        let resp = get(app, "/city/CA/Ithaca").await;
        assert_eq!(resp.status, StatusCode::NOT_FOUND);
        assert!(resp.body.contains("No Shows Found In Ithaca CA"));
    }

    #[tokio::test]
    async fn test_shows_in_state_paginates() {
        let (_dir, app) = test_app().await;

        let resp = get(app, "/state/MO").await;
        assert_eq!(resp.status, StatusCode::OK);
        assert!(resp.body.contains("<title>23 Shows In MO</title>"));
        assert!(resp.body.contains("Page 1 of 3"));
        assert!(resp.body.contains("January 1, 1973"));
        assert!(!resp.body.contains("January 11, 1973"));
        assert!(resp.body.contains("offset=10&amp;state=MO"));
        assert!(resp.body.contains(r#"<span class="inert">Previous</span>"#));
    }

    #[tokio::test]
    async fn test_first_and_last_links() {
        let (_dir, app) = test_app().await;

        let resp = get(app, "/state/MO?offset=10").await;
        assert!(resp.body.contains("Page 2 of 3"));
        assert!(resp.body.contains(r#"offset=0&amp;state=MO">First</a>"#));
        assert!(resp.body.contains(r#"offset=13&amp;state=MO">Last</a>"#));
    }

    #[tokio::test]
    async fn test_links_encode_reserved_characters() {
        let (_dir, app) = test_app_with_question_song().await;

        let resp = get(app.clone(), "/song/Who%20Do%20You%20Love%3F").await;
        assert_eq!(resp.status, StatusCode::OK);
        assert!(resp.body.contains("Who Do You Love? Was Played At 23 Shows"));
        assert!(resp.body.contains(r#"Who%20Do%20You%20Love%3F?offset=10&amp;song=Who+Do+You+Love%3F">Next</a>"#));
        assert!(resp.body.contains(r#"Who%20Do%20You%20Love%3F?offset=13&amp;song=Who+Do+You+Love%3F">Last</a>"#));

        let resp = get(app.clone(), "/song/Who%20Do%20You%20Love%3F?offset=10&song=Who+Do+You+Love%3F").await;
        assert_eq!(resp.status, StatusCode::OK);
        assert!(resp.body.contains("Page 2 of 3"));

        let resp = get(app, "/songs").await;
        assert!(resp.body.contains("Who%20Do%20You%20Love%3F"));
    }

    #[tokio::test]
    async fn test_venue_links_are_encoded() {
        let (_dir, app) = test_app().await;

        let resp = get(app.clone(), "/venues").await;
        assert!(resp.body.contains("Barton%20Hall"));
        assert!(resp.body.contains("Wembley%20Empire%20Pool"));

        let resp = get(app, "/state/MO").await;
        assert!(resp.body.contains("St.%20Louis"));
    }

    #[tokio::test]
    async fn test_offset_past_the_end_shows_last_page() {
        let (_dir, app) = test_app().await;

        let resp = get(app, "/state/MO?offset=500").await;
        assert_eq!(resp.status, StatusCode::OK);
        assert!(resp.body.contains("Page 3 of 3"));
        assert!(resp.body.contains("January 14, 1973"));
        assert!(resp.body.contains("January 23, 1973"));
        assert!(!resp.body.contains("January 13, 1973"));
        assert!(resp.body.contains(r#"<span class="inert">Next</span>"#));
    }

    #[tokio::test]
    async fn test_malformed_paging_parameters_fall_back() {
        let (_dir, app) = test_app().await;

        let resp = get(app.clone(), "/state/MO?offset=abc&max=zzz").await;
        assert_eq!(resp.status, StatusCode::OK);
        assert!(resp.body.contains("Page 1 of 3"));
        assert!(resp.body.contains("January 1, 1973"));

        let resp = get(app.clone(), "/state/MO?offset=-5&max=500").await;
        assert_eq!(resp.status, StatusCode::OK);
        assert!(resp.body.contains("Page 1 of 3"));

        let resp = get(app, "/state/MO?offset=1&offset=2").await;
        assert_eq!(resp.status, StatusCode::OK);
        assert!(resp.body.contains("Page 2 of 3"));
    }

    #[tokio::test]
    async fn test_requested_page_size_is_kept_in_links() {
        let (_dir, app) = test_app().await;

        let resp = get(app, "/state/MO?max=5").await;
        assert!(resp.body.contains("Page 1 of 5"));
        assert!(resp.body.contains("offset=5&amp;max=5&amp;state=MO"));
    }

    #[tokio::test]
    async fn test_shows_in_country() {
        let (_dir, app) = test_app().await;

        let resp = get(app.clone(), "/country/US").await;
        assert_eq!(resp.status, StatusCode::OK);
        assert!(resp.body.contains("<title>28 Shows In US</title>"));

        let resp = get(app, "/country/England").await;
        assert!(resp.body.contains("<title>1 Shows In England</title>"));
        assert!(resp.body.contains("Wembley Empire Pool"));
    }

    #[tokio::test]
    async fn test_shows_in_year() {
        let (_dir, app) = test_app().await;

        let resp = get(app.clone(), "/year/1977").await;
        assert_eq!(resp.status, StatusCode::OK);
        assert!(resp.body.contains("<title>There Were 2 Shows In 1977</title>"));

        let resp = get(app.clone(), "/year/1974").await;
        assert!(resp.body.contains("There Were 1 Shows In 1974"));
        assert!(resp.body.contains("May 19, 1974"));

        let resp = get(app, "/year/2020").await;
        assert_eq!(resp.status, StatusCode::OK);
        assert!(resp.body.contains("There Were 0 Shows In 2020"));
        assert!(!resp.body.contains("class=\"pagination\""));
    }

    #[tokio::test]
    async fn test_shows_with_song() {
        let (_dir, app) = test_app().await;

        let resp = get(app.clone(), "/song/Sugaree").await;
        assert_eq!(resp.status, StatusCode::OK);
        assert!(resp.body.contains("<title>Sugaree Was Played At 2 Shows</title>"));

        let resp = get(app.clone(), "/song/scarlet%20begonias").await;
        assert!(resp.body.contains("scarlet begonias Was Played At 2 Shows"));

        let resp = get(app, "/song/Dark%20Star").await;
        assert_eq!(resp.status, StatusCode::NOT_FOUND);
        assert!(resp.body.contains("No Shows Found With Song: Dark Star"));
    }

    #[tokio::test]
    async fn test_show_on_date() {
        let (_dir, app) = test_app().await;

        let resp = get(app.clone(), "/show/1977/05/08").await;
        assert_eq!(resp.status, StatusCode::OK);
        assert!(resp.body.contains("<title>Show - May 8, 1977</title>"));
        assert!(resp.body.contains("Set 1"));
        assert!(resp.body.contains("Set 2"));
        assert!(resp.body.contains("Fire on the Mountain"));

        let resp = get(app, "/show/1977/5/8").await;
        assert_eq!(resp.status, StatusCode::OK);
        assert!(resp.body.contains("Show - May 8, 1977"));
    }

    #[tokio::test]
    async fn test_show_not_found() {
        let (_dir, app) = test_app().await;

        let resp = get(app.clone(), "/show/1977/05/10").await;
        assert_eq!(resp.status, StatusCode::NOT_FOUND);
        assert!(resp.body.contains("Show Not Found: 1977-05-10"));
        assert!(resp.body.contains("<html"));

        let resp = get_htmx(app, "/show/1977/05/10").await;
        assert_eq!(resp.status, StatusCode::NOT_FOUND);
        assert!(!resp.body.contains("<html"));
        assert!(resp.body.contains("Show Not Found: 1977-05-10"));
    }

    #[tokio::test]
    async fn test_show_with_invalid_date() {
        let (_dir, app) = test_app().await;

        let resp = get(app.clone(), "/show/1977/13/40").await;
        assert_eq!(resp.status, StatusCode::BAD_REQUEST);
        assert!(resp.body.contains("Show Not Found: 1977-13-40"));

        let resp = get(app, "/show/abcd/ef/gh").await;
        assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_song_search() {
        let (_dir, app) = test_app().await;

        let resp = search(app.clone(), "songTitle=scar", true).await;
        assert_eq!(resp.status, StatusCode::OK);
        assert!(resp.body.contains("Scarlet Begonias"));
        assert!(!resp.body.contains("Sugaree"));
        assert!(!resp.body.contains("<html"));
        assert!(!resp.body.contains("<title>"));

        let resp = search(app.clone(), "songTitle=Twist", true).await;
        assert!(resp.body.contains("No songs found."));

        let resp = search(app, "", false).await;
        assert_eq!(resp.status, StatusCode::OK);
        assert!(resp.body.contains("<html"));
    }

    #[tokio::test]
    async fn test_about_page() {
        let (_dir, app) = test_app().await;

        let resp = get(app, "/about").await;
        assert_eq!(resp.status, StatusCode::OK);
        assert!(resp.body.contains("<title>About</title>"));
        assert!(resp.body.contains("<dd>29</dd>"));
        assert!(resp.body.contains("Song performances"));
    }

    #[tokio::test]
    async fn test_static_assets() {
        let (_dir, app) = test_app().await;

        let resp = get(app.clone(), "/static/css/main.css").await;
        assert_eq!(resp.status, StatusCode::OK);
        assert_eq!(resp.content_type.as_deref(), Some("text/css"));
        assert!(resp.body.contains("main"));

        let resp = get(app.clone(), "/static/js/footer.js").await;
        assert_eq!(resp.status, StatusCode::OK);
        assert!(resp.body.contains("updateFooterMessage"));

        let resp = get(app, "/static/css/missing.css").await;
        assert_eq!(resp.status, StatusCode::NOT_FOUND);
    }
}
