use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;

use chrono::Utc;

use crate::app::{AppContext, Result};
use crate::controller::{Interaction, InteractionController, StatLine};
use crate::domain::FilterCategory;
use crate::render::{HtmlSink, TextSink};

use super::{ThemeAction, ViewArgs};

/// Replay the requested view onto a freshly loaded controller.
pub async fn prepare_view(ctx: &AppContext, args: &ViewArgs) -> InteractionController {
    let mut controller = ctx.load_controller().await;
    apply_view(&mut controller, args);
    controller
}

pub fn apply_view(controller: &mut InteractionController, args: &ViewArgs) {
    let now = Instant::now();

    if let Some(filter) = &args.filter {
        controller.handle(Interaction::SelectFilter(FilterCategory::from_key(filter)), now);
    }
    if let Some(sort) = args.sort {
        controller.handle(Interaction::SelectSort(sort.into()), now);
    }
    if let Some(query) = &args.search {
        controller.handle(Interaction::SearchInput(query.clone()), now);
        if let Some(deadline) = controller.search_deadline() {
            controller.tick(deadline);
        }
    }
    for _ in 1..args.pages {
        controller.handle(Interaction::LoadMore, now);
    }
}

pub async fn render_html(ctx: &AppContext, args: &ViewArgs, output: Option<&Path>) -> Result<()> {
    let controller = prepare_view(ctx, args).await;
    let theme = ctx.theme_controller().current();

    let mut sink = HtmlSink::new(theme);
    controller.render(&mut sink, Utc::now())?;
    let document = sink.into_document();

    match output {
        Some(path) => {
            fs::write(path, document)?;
            println!("Wrote {}", path.display());
        }
        None => {
            io::stdout().write_all(document.as_bytes())?;
        }
    }

    Ok(())
}

pub async fn list_topics(ctx: &AppContext, args: &ViewArgs) -> Result<()> {
    let controller = prepare_view(ctx, args).await;
    let mut sink = TextSink::new(io::stdout().lock());
    controller.render(&mut sink, Utc::now())
}

pub async fn show_stats(ctx: &AppContext) -> Result<()> {
    let controller = ctx.load_controller().await;
    let frame = controller.frame(Utc::now());

    if let Some(message) = controller.load_error() {
        eprintln!("{}", message);
        return Ok(());
    }

    if let Some(StatLine {
        screened,
        topics,
        trending,
        new_policies,
    }) = &frame.stats
    {
        println!("Items screened: {}", screened);
        println!("Topics:         {}", topics);
        println!("Trending:       {}", trending);
        println!("New policies:   {}", new_policies);
    }
    println!("Last updated:   {}", frame.last_updated);

    println!();
    println!("Categories:");
    for pill in frame.pills {
        match pill.count {
            Some(count) => println!("  {} ({})", pill.label, count),
            None => println!("  {}", pill.label),
        }
    }

    Ok(())
}

pub fn theme(ctx: &AppContext, action: Option<ThemeAction>) -> Result<()> {
    let mut theme = ctx.theme_controller();

    let current = match action {
        None | Some(ThemeAction::Show) => theme.current(),
        Some(ThemeAction::Toggle) => theme.toggle(),
        Some(ThemeAction::Set { theme: next }) => theme.set(next),
    };

    println!("{}", current);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::SortArg;
    use crate::domain::{FeedDocument, SortMode};
    use crate::fetcher::LoadedFeed;
    use std::time::Duration;

    fn loaded_controller(topics: usize) -> InteractionController {
        let topics: Vec<String> = (0..topics)
            .map(|i| {
                format!(
                    r#"{{"label":"Topic {i}","policy_type":"{}","article_count":{i},"latest_date":"2024-01-{:02}"}}"#,
                    if i % 2 == 0 { "Tax" } else { "Trade" },
                    i % 28 + 1
                )
            })
            .collect();
        let json = format!(r#"{{"stats":{{}},"topics":[{}]}}"#, topics.join(","));
        let document: FeedDocument = serde_json::from_str(&json).unwrap();

        let mut controller = InteractionController::new(3, Duration::from_millis(300));
        controller.on_loaded(Ok(LoadedFeed::from_document(document, Utc::now())));
        controller
    }

    #[test]
    fn test_apply_view_filter_and_sort() {
        let mut controller = loaded_controller(6);
        apply_view(
            &mut controller,
            &ViewArgs {
                filter: Some("Tax".into()),
                sort: Some(SortArg::Recent),
                search: None,
                pages: 1,
            },
        );

        assert_eq!(controller.view().sort, SortMode::Recent);
        let labels: Vec<&str> = controller
            .visible_topics()
            .iter()
            .map(|t| t.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Topic 4", "Topic 2", "Topic 0"]);
    }

    #[test]
    fn test_apply_view_commits_search_immediately() {
        let mut controller = loaded_controller(6);
        apply_view(
            &mut controller,
            &ViewArgs {
                search: Some("  topic 5 ".into()),
                pages: 1,
                ..Default::default()
            },
        );

        assert_eq!(controller.view().search_query, "topic 5");
        assert_eq!(controller.visible_topics().len(), 1);
    }

    #[test]
    fn test_apply_view_pages() {
        let mut controller = loaded_controller(7);
        apply_view(
            &mut controller,
            &ViewArgs {
                pages: 2,
                ..Default::default()
            },
        );

        assert_eq!(controller.view().page_depth, 2);
        let frame = controller.frame(Utc::now());
        assert_eq!(frame.body.cards().len(), 6);
        assert_eq!(frame.body.load_more(), Some(1));
    }
}
