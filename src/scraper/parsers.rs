//! DOM adapter: turns a rendered results page into [`MatchRow`]s.
//!
//! Every read here is best effort. A missing element, attribute or empty
//! text comes back as `None`; nothing in this module returns an error once
//! the selectors have compiled.

use crate::config::SelectorConfig;
use crate::models::Side;
use anyhow::Result;
use ::scraper::{ElementRef, Html, Selector};

use super::MatchRow;

fn compile(name: &str, selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| anyhow::anyhow!("{} selector: {}", name, e))
}

// ── Selectors ─────────────────────────────────────────────────────────────────

/// Compiled form of [`SelectorConfig`], built once per run.
#[derive(Debug)]
pub struct PageSelectors {
    row: Selector,
    status_attribute: String,
    row_date: Selector,
    day_header: Selector,
    home_participant: Selector,
    away_participant: Selector,
    home_score: Selector,
    away_score: Selector,
    heading: Selector,
}

impl PageSelectors {
    pub fn compile(config: &SelectorConfig) -> Result<Self> {
        Ok(Self {
            row: compile("row", &config.row)?,
            status_attribute: config.status_attribute.clone(),
            row_date: compile("row_date", &config.row_date)?,
            day_header: compile("day_header", &config.day_header)?,
            home_participant: compile("home_participant", &config.home_participant)?,
            away_participant: compile("away_participant", &config.away_participant)?,
            home_score: compile("home_score", &config.home_score)?,
            away_score: compile("away_score", &config.away_score)?,
            heading: compile("heading", &config.heading)?,
        })
    }

    fn participant(&self, side: Side) -> &Selector {
        match side {
            Side::Home => &self.home_participant,
            Side::Away => &self.away_participant,
        }
    }

    fn score(&self, side: Side) -> &Selector {
        match side {
            Side::Home => &self.home_score,
            Side::Away => &self.away_score,
        }
    }
}

// ── Results page ──────────────────────────────────────────────────────────────

pub struct ResultsPage<'s> {
    doc: Html,
    selectors: &'s PageSelectors,
}

impl<'s> ResultsPage<'s> {
    pub fn parse(html: &str, selectors: &'s PageSelectors) -> Self {
        Self {
            doc: Html::parse_document(html),
            selectors,
        }
    }

    /// Match rows in document order. An element matching several of the
    /// row layouts is yielded once.
    pub fn rows(&self) -> impl Iterator<Item = DomRow<'_>> {
        let selectors = self.selectors;
        self.doc
            .select(&selectors.row)
            .map(move |el| DomRow { el, selectors })
    }

    /// Text of the first primary heading.
    pub fn heading(&self) -> Option<String> {
        self.doc
            .select(&self.selectors.heading)
            .next()
            .and_then(element_text)
    }
}

// ── Row ───────────────────────────────────────────────────────────────────────

pub struct DomRow<'a> {
    el: ElementRef<'a>,
    selectors: &'a PageSelectors,
}

impl MatchRow for DomRow<'_> {
    fn status(&self) -> Option<String> {
        self.el
            .value()
            .attr(&self.selectors.status_attribute)
            .map(str::to_string)
    }

    fn own_date_text(&self) -> Option<String> {
        first_text(self.el, &self.selectors.row_date)
    }

    fn header_date_text(&self) -> Option<String> {
        nearest_preceding(self.el, &self.selectors.day_header).and_then(element_text)
    }

    fn participant(&self, side: Side) -> Option<String> {
        first_text(self.el, self.selectors.participant(side))
    }

    fn score(&self, side: Side) -> Option<String> {
        first_text(self.el, self.selectors.score(side))
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// All text below `el`, whitespace runs collapsed to one space.
/// Empty text is `None`.
pub fn element_text(el: ElementRef) -> Option<String> {
    let text = el
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ");
    if text.is_empty() { None } else { Some(text) }
}

fn first_text(el: ElementRef, selector: &Selector) -> Option<String> {
    el.select(selector).next().and_then(element_text)
}

/// Closest element matching `selector` that comes before `el` in document
/// order, ancestors excluded. Walks previous siblings (deepest last
/// descendant first), then repeats from the parent.
pub fn nearest_preceding<'a>(el: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    let mut current = el;
    loop {
        for sibling in current.prev_siblings().filter_map(ElementRef::wrap) {
            if let Some(hit) = sibling.select(selector).last() {
                return Some(hit);
            }
            if selector.matches(&sibling) {
                return Some(sibling);
            }
        }
        current = current.parent().and_then(ElementRef::wrap)?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <h1>  LIDOM
                2024/2025 </h1>
          <div class="sportName baseball">
            <div class="event__header"><span>Dominican Republic</span></div>
            <div class="wrapper">
              <div class="event__day">Saturday, 09.11.</div>
            </div>
            <div class="event__match event__match--static event__match--finished" id="r1">
              <div class="event__time">09.11. 19:00</div>
              <div class="event__participant event__participant--home">Tigres
                 del Licey</div>
              <div class="event__participant event__participant--away">Leones</div>
              <div class="event__score event__score--home">4</div>
              <div class="event__score event__score--away">2</div>
            </div>
            <div class="event__match event__match--twoLine event__match--finished" id="r2">
              <div class="event__participant event__participant--home">Gigantes</div>
              <div class="event__participant event__participant--away">Toros</div>
              <div class="event__score event__score--home">1</div>
            </div>
            <div class="event__day event__dayHeader">08.11.</div>
            <div class="event__match event__match--scheduled" id="r3">
              <div class="event__participant event__participant--home">Aguilas</div>
            </div>
          </div>
        </body></html>
    "#;

    fn selectors() -> PageSelectors {
        PageSelectors::compile(&SelectorConfig::default()).unwrap()
    }

    fn sel(s: &str) -> Selector {
        Selector::parse(s).unwrap()
    }

    #[test]
    fn rows_cover_both_layouts_once() {
        let selectors = selectors();
        let page = ResultsPage::parse(PAGE, &selectors);
        assert_eq!(page.rows().count(), 3);
        let ids: Vec<_> = page
            .rows()
            .map(|r| r.el.value().attr("id").unwrap_or_default().to_string())
            .collect();
        assert_eq!(ids, ["r1", "r2", "r3"]);
    }

    #[test]
    fn row_reads_fields() {
        let selectors = selectors();
        let page = ResultsPage::parse(PAGE, &selectors);
        let rows: Vec<_> = page.rows().collect();

        let first = &rows[0];
        assert!(first.status().unwrap().contains("event__match--finished"));
        assert_eq!(first.own_date_text().as_deref(), Some("09.11. 19:00"));
        assert_eq!(first.participant(Side::Home).as_deref(), Some("Tigres del Licey"));
        assert_eq!(first.participant(Side::Away).as_deref(), Some("Leones"));
        assert_eq!(first.score(Side::Home).as_deref(), Some("4"));
        assert_eq!(first.score(Side::Away).as_deref(), Some("2"));

        let second = &rows[1];
        assert_eq!(second.own_date_text(), None);
        assert_eq!(second.score(Side::Away), None);
    }

    #[test]
    fn header_is_nearest_preceding_day() {
        let selectors = selectors();
        let page = ResultsPage::parse(PAGE, &selectors);
        let rows: Vec<_> = page.rows().collect();

        // Header nested inside an earlier sibling still counts.
        assert_eq!(rows[0].header_date_text().as_deref(), Some("Saturday, 09.11."));
        assert_eq!(rows[1].header_date_text().as_deref(), Some("Saturday, 09.11."));
        assert_eq!(rows[2].header_date_text().as_deref(), Some("08.11."));
    }

    #[test]
    fn heading_is_collapsed() {
        let selectors = selectors();
        let page = ResultsPage::parse(PAGE, &selectors);
        assert_eq!(page.heading().as_deref(), Some("LIDOM 2024/2025"));

        let bare = ResultsPage::parse("<div></div>", &selectors);
        assert_eq!(bare.heading(), None);
    }

    #[test]
    fn preceding_walks_out_of_nested_containers() {
        let doc = Html::parse_document(
            r#"<div class="day">A</div>
               <section><div><p id="x">row</p></div></section>"#,
        );
        let row = doc.select(&sel("#x")).next().unwrap();
        let found = nearest_preceding(row, &sel(".day")).unwrap();
        assert_eq!(element_text(found).as_deref(), Some("A"));
    }

    #[test]
    fn preceding_ignores_ancestors_and_later_elements() {
        let doc = Html::parse_document(
            r#"<div class="day"><p id="x">row</p></div><div class="day">later</div>"#,
        );
        let row = doc.select(&sel("#x")).next().unwrap();
        assert!(nearest_preceding(row, &sel(".day")).is_none());
    }

    #[test]
    fn empty_text_is_none() {
        let doc = Html::parse_document(r#"<p id="x">   </p>"#);
        let el = doc.select(&sel("#x")).next().unwrap();
        assert_eq!(element_text(el), None);
    }
}
