// src/pipeline.rs

use anyhow::{Context, Result};
use std::{collections::HashSet, path::PathBuf};
use tracing::{error, info, instrument};

use crate::config::Config;
use crate::fetch::{parse_tables, Fetcher};
use crate::process::{merge, normalize, prepare_for_write, NationAllowList};
use crate::ship::Dataset;
use crate::workbook::{read_dataset, write_dataset};

#[derive(Debug, PartialEq)]
pub enum RunOutcome {
    Written {
        path: PathBuf,
        /// Rows in the written file.
        records: usize,
        /// IDs that were not in the previous file.
        added: usize,
    },
    /// The page could not be fetched; nothing was written.
    FetchFailed,
}

/// fetch → parse → normalize → (merge with previous file) → cleanup → write.
#[instrument(level = "info", skip_all, fields(url = %config.source_url))]
pub fn run<F: Fetcher>(config: &Config, fetcher: &F) -> Result<RunOutcome> {
    // ─── 1) fetch ────────────────────────────────────────────────────
    let markup = match fetcher.fetch(&config.source_url) {
        Ok(markup) => markup,
        Err(e) => {
            error!(error = %e, "fetch failed; leaving dataset untouched");
            println!("URL cannot be reached: {}", e);
            return Ok(RunOutcome::FetchFailed);
        }
    };
    info!(bytes = markup.len(), "fetched page");

    // ─── 2) parse & normalize ────────────────────────────────────────
    let tables = parse_tables(&markup, config.table_count);
    let fresh = normalize(&tables, config.table_count).context("normalizing ship tables")?;
    info!(records = fresh.len(), "normalized fresh ships");

    // ─── 3) merge with the previous dataset, if any ──────────────────
    let path = &config.dataset_path;
    let (merged, added) = if path.exists() {
        let previous = read_dataset(path)
            .with_context(|| format!("reading previous dataset {}", path.display()))?;
        info!(records = previous.len(), "loaded previous dataset");
        let added = count_new_ids(&previous, &fresh);
        (merge(previous, fresh), added)
    } else {
        info!(path = %path.display(), "no previous dataset; writing fresh data only");
        let added = count_new_ids(&Dataset::new(), &fresh);
        (fresh, added)
    };

    // ─── 4) cleanup & write ──────────────────────────────────────────
    let allow = NationAllowList::new(config.nations.iter().cloned());
    let ready = prepare_for_write(merged, &allow);
    write_dataset(path, &config.sheet_name, &ready)
        .with_context(|| format!("writing {}", path.display()))?;
    info!(records = ready.len(), added, path = %path.display(), "dataset written");

    Ok(RunOutcome::Written {
        path: path.clone(),
        records: ready.len(),
        added,
    })
}

fn count_new_ids(previous: &Dataset, fresh: &Dataset) -> usize {
    let known: HashSet<&str> = previous.iter().map(|s| s.id.as_str()).collect();
    fresh
        .iter()
        .filter(|s| !s.is_malformed())
        .map(|s| s.id.as_str())
        .collect::<HashSet<_>>()
        .difference(&known)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::process::normalize::STAT_COLUMNS;
    use crate::process::COLLAB;
    use crate::ship::Stat;
    use std::cell::Cell as Counter;
    use std::fmt::Write as _;
    use tempfile::tempdir;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    use url::Url;

    fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,shipscraper=debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    struct StaticFetcher {
        markup: String,
        calls: Counter<usize>,
    }

    impl Fetcher for StaticFetcher {
        fn fetch(&self, _url: &Url) -> Result<String, FetchError> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.markup.clone())
        }
    }

    struct FailingFetcher;

    impl Fetcher for FailingFetcher {
        fn fetch(&self, url: &Url) -> Result<String, FetchError> {
            Err(FetchError::Status {
                url: url.to_string(),
                status: reqwest::StatusCode::NOT_FOUND,
            })
        }
    }

    /// (id, name, rarity, nation) per section.
    type Section<'a> = Vec<(&'a str, &'a str, &'a str, &'a str)>;

    /// A page shaped like the wiki: one tabber per hull class, stat headers blank.
    fn page(sections: &[Section<'_>]) -> String {
        let mut html = String::from("<html><body>");
        for ships in sections {
            html.push_str(r#"<div class="tabber"><table><tr>"#);
            for label in ["ID", "Ship Name", "Rarity", "Nation", "Type", "", "", "Spd"] {
                let _ = write!(html, "<th>{}</th>", label);
            }
            for _ in 8..=19 {
                html.push_str("<th></th>");
            }
            html.push_str("</tr>");
            for (id, name, rarity, nation) in ships {
                let _ = write!(
                    html,
                    "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>Destroyer</td>",
                    id, name, rarity, nation
                );
                for i in 5..=19 {
                    let _ = write!(html, "<td>{}</td>", i * 10);
                }
                html.push_str("</tr>");
            }
            html.push_str("</table></div>");
        }
        html.push_str("</body></html>");
        html
    }

    fn seven(first: Section<'_>) -> Vec<Section<'_>> {
        let mut sections = vec![first];
        sections.resize(7, Vec::new());
        sections
    }

    fn config_in(dir: &std::path::Path) -> Config {
        Config {
            dataset_path: dir.join("ships.xlsx"),
            ..Config::default()
        }
    }

    #[test]
    fn first_run_writes_fresh_ships() -> Result<()> {
        init_test_logging();
        let tmp = tempdir()?;
        let config = config_in(tmp.path());
        let fetcher = StaticFetcher {
            markup: page(&seven(vec![
                ("001", "Javelin", "Rare", "Royal Navy"),
                ("", "Broken", "Rare", "Royal Navy"),
                ("Collab012", "Neptune", "Super Rare", "Neptunia Collab"),
            ])),
            calls: Counter::new(0),
        };

        let outcome = run(&config, &fetcher)?;
        assert_eq!(fetcher.calls.get(), 1);
        assert_eq!(
            outcome,
            RunOutcome::Written {
                path: config.dataset_path.clone(),
                records: 2,
                added: 2,
            }
        );

        let written = read_dataset(&config.dataset_path)?;
        assert_eq!(written.len(), 2);
        assert_eq!(written[0].id, "001");
        assert_eq!(written[0].acquired, "");
        assert_eq!(written[0].stats.get(Stat::Luck), Some(50.0));
        assert_eq!(written[0].stats.get(Stat::Accuracy), Some(190.0));
        assert_eq!(written[1].nation, COLLAB);
        Ok(())
    }

    #[test]
    fn rerun_keeps_hand_edited_acquired_flags() -> Result<()> {
        init_test_logging();
        let tmp = tempdir()?;
        let config = config_in(tmp.path());

        let first = StaticFetcher {
            markup: page(&seven(vec![("001", "Javelin", "Rare", "Royal Navy")])),
            calls: Counter::new(0),
        };
        run(&config, &first)?;

        // the user ticks Javelin off in the spreadsheet
        let mut saved = read_dataset(&config.dataset_path)?;
        saved[0].acquired = "Yes".into();
        write_dataset(&config.dataset_path, &config.sheet_name, &saved)?;

        let second = StaticFetcher {
            markup: page(&seven(vec![
                ("001", "Javelin", "Rare", "Royal Navy"),
                ("002", "Laffey", "Elite", "Eagle Union"),
            ])),
            calls: Counter::new(0),
        };
        let outcome = run(&config, &second)?;
        assert!(matches!(outcome, RunOutcome::Written { records: 2, added: 1, .. }));

        let written = read_dataset(&config.dataset_path)?;
        let acquired: Vec<(&str, &str)> = written
            .iter()
            .map(|s| (s.id.as_str(), s.acquired.as_str()))
            .collect();
        assert_eq!(acquired, vec![("001", "Yes"), ("002", "")]);
        Ok(())
    }

    #[test]
    fn fetch_failure_writes_nothing() -> Result<()> {
        init_test_logging();
        let tmp = tempdir()?;
        let config = config_in(tmp.path());

        assert_eq!(run(&config, &FailingFetcher)?, RunOutcome::FetchFailed);
        assert!(!config.dataset_path.exists());
        Ok(())
    }

    #[test]
    fn layout_change_aborts_before_writing() -> Result<()> {
        init_test_logging();
        let tmp = tempdir()?;
        let config = config_in(tmp.path());
        let mut sections = seven(vec![("001", "Javelin", "Rare", "Royal Navy")]);
        sections.pop();
        let fetcher = StaticFetcher {
            markup: page(&sections),
            calls: Counter::new(0),
        };

        let err = run(&config, &fetcher).unwrap_err();
        assert!(err.downcast_ref::<crate::error::SchemaMismatchError>().is_some());
        assert!(!config.dataset_path.exists());
        Ok(())
    }

    #[test]
    fn sections_without_tables_abort_and_keep_previous_file() -> Result<()> {
        init_test_logging();
        let tmp = tempdir()?;
        let config = config_in(tmp.path());

        let good = StaticFetcher {
            markup: page(&seven(vec![("001", "Javelin", "Rare", "Royal Navy")])),
            calls: Counter::new(0),
        };
        run(&config, &good)?;
        let before = read_dataset(&config.dataset_path)?;

        let mut html = String::from("<html><body>");
        for _ in 0..7 {
            html.push_str(r#"<div class="tabber"><p>layout changed</p></div>"#);
        }
        html.push_str("</body></html>");
        let broken = StaticFetcher {
            markup: html,
            calls: Counter::new(0),
        };

        let err = run(&config, &broken).unwrap_err();
        assert_eq!(
            err.downcast_ref::<crate::error::SchemaMismatchError>(),
            Some(&crate::error::SchemaMismatchError::MissingTable { section: 0 })
        );
        assert_eq!(read_dataset(&config.dataset_path)?, before);
        Ok(())
    }

    #[test]
    fn missing_table_on_first_run_writes_nothing() -> Result<()> {
        init_test_logging();
        let tmp = tempdir()?;
        let config = config_in(tmp.path());
        // six real sections, then one whose table was replaced by prose
        let mut sections = seven(vec![("001", "Javelin", "Rare", "Royal Navy")]);
        sections.pop();
        let markup = page(&sections).replacen(
            "</body>",
            r#"<div class="tabber"><p>layout changed</p></div></body>"#,
            1,
        );
        let fetcher = StaticFetcher {
            markup,
            calls: Counter::new(0),
        };

        let err = run(&config, &fetcher).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<crate::error::SchemaMismatchError>(),
            Some(crate::error::SchemaMismatchError::MissingTable { section: 6 })
        ));
        assert!(!config.dataset_path.exists());
        Ok(())
    }

    #[test]
    fn fixture_page_matches_the_stat_table() {
        let tables = parse_tables(&page(&[vec![("001", "A", "Rare", "META")]]), 1);
        let labels = &tables[0].as_ref().expect("fixture section has a table").labels;
        for (_, label) in STAT_COLUMNS {
            assert!(labels.iter().any(|l| l == label), "{label}");
        }
    }
}
