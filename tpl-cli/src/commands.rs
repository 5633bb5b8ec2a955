//! Subcommand implementations.

use std::{io::Write, sync::Arc};

use tpl_core::{
    BranchDetail, Catalogue, MapRegion, distance_meters, reference_coordinate,
    request_if_undetermined,
};
use tpl_data::{BundleSource, DatasetLoader, DetailDatasets, LoadError};

use crate::{CliError, Command, config::BrowseConfig, render};

/// Load the data `command` needs from the configured bundle and render it.
pub(crate) fn run_command(
    command: &Command,
    config: &BrowseConfig,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let source = BundleSource::open(&config.data_dir)
        .map_err(|source| CliError::OpenDataDir {
            path: config.data_dir.clone(),
            source,
        })?
        .with_policy(config.policy);
    let loader = DatasetLoader::new(Arc::new(source));
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    runtime.block_on(execute(command, &loader, config, writer))
}

async fn execute(
    command: &Command,
    loader: &DatasetLoader,
    config: &BrowseConfig,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let state = request_if_undetermined(config.provider());
    log::debug!("location authorisation: {state:?}");
    match command {
        Command::List { query } => list(loader, config, query, writer).await,
        Command::Detail { code } => detail(loader, config, code, writer).await,
        Command::Nearest => nearest(loader, config, writer).await,
        Command::Region => region(loader, config, writer).await,
    }
}

async fn list(
    loader: &DatasetLoader,
    config: &BrowseConfig,
    query: &str,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let loaded = loader.spawn_branches().await?;
    let catalogue = Catalogue::new(loaded.records);
    let rows = catalogue.search(query, config.provider());
    render::write_list(writer, &rows, query, !catalogue.is_empty())?;
    render::write_skipped(writer, &loaded.skipped)?;
    Ok(())
}

async fn detail(
    loader: &DatasetLoader,
    config: &BrowseConfig,
    code: &str,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let (branches, joined) = tokio::join!(loader.spawn_branches(), loader.load_detail());
    let loaded = branches?;
    let catalogue = Catalogue::new(loaded.records);
    let branch = catalogue
        .find_by_code(code)
        .ok_or_else(|| CliError::UnknownBranch {
            code: code.to_owned(),
        })?;
    let DetailDatasets {
        visits,
        events,
        skipped,
    } = joined;
    let (visits, visits_error) = split(visits);
    let (events, events_error) = split(events);

    let detail = BranchDetail::assemble(branch, &visits, &events);
    let distance = reference_coordinate(config.provider())
        .map(|from| distance_meters(from, branch.location()));
    render::write_detail(
        writer,
        &detail,
        distance,
        visits_error.is_none(),
        events_error.is_none(),
    )?;
    render::write_skipped(writer, &loaded.skipped)?;
    render::write_skipped(writer, &skipped)?;

    match (visits_error, events_error) {
        (Some(first), second) => {
            if let Some(other) = second {
                log::warn!("{other}");
            }
            Err(first.into())
        }
        (None, Some(only)) => Err(only.into()),
        (None, None) => Ok(()),
    }
}

async fn nearest(
    loader: &DatasetLoader,
    config: &BrowseConfig,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let loaded = loader.spawn_branches().await?;
    let catalogue = Catalogue::new(loaded.records);
    if catalogue.is_empty() {
        writeln!(writer, "{}", render::NO_LIBRARIES)?;
    } else {
        let found = catalogue.nearest(config.provider());
        render::write_nearest(writer, found.as_ref())?;
    }
    render::write_skipped(writer, &loaded.skipped)?;
    Ok(())
}

async fn region(
    loader: &DatasetLoader,
    config: &BrowseConfig,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let loaded = loader.spawn_branches().await?;
    let catalogue = Catalogue::new(loaded.records);
    render::write_region(writer, "Map", &catalogue.region())?;
    if let Some(from) = reference_coordinate(config.provider()) {
        render::write_region(writer, "Around you", &MapRegion::around(from))?;
    }
    render::write_skipped(writer, &loaded.skipped)?;
    Ok(())
}

fn split<T>(outcome: Result<Vec<T>, LoadError>) -> (Vec<T>, Option<LoadError>) {
    match outcome {
        Ok(records) => (records, None),
        Err(err) => (Vec::new(), Some(err)),
    }
}
