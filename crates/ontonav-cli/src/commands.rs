use anyhow::{Context, Result, anyhow};
use comfy_table::Table;
use tracing::{debug, info};

use ontonav_core::{
    ApplicationConfig, NavigationSettings, PerspectiveResolver, PlaceCodec, UrlBuilder,
};
use ontonav_model::{EntityRef, EntityType, PerspectiveId, Place, ProjectId, Selection};

use crate::cli::{AppArgs, Command, EncodeArgs};

/// Builds the URL builder from `--config` or the individual flags.
pub fn url_builder(args: &AppArgs) -> Result<UrlBuilder> {
    let (config, resolver) = match &args.config {
        Some(path) => {
            let settings = NavigationSettings::load(path)
                .with_context(|| format!("load settings from {}", path.display()))?;
            let resolver = settings.resolver()?;
            (settings.application, resolver)
        }
        None => {
            let config = ApplicationConfig::new(
                args.host.clone(),
                args.path.clone(),
                args.display_name.clone(),
            );
            let config = if args.https {
                config.with_scheme("https")
            } else {
                config
            };
            (config, PerspectiveResolver::standard())
        }
    };
    UrlBuilder::new(config, resolver).context("invalid application configuration")
}

/// Runs `command` and returns the text to print.
pub fn run(command: &Command, builder: &UrlBuilder) -> Result<String> {
    match command {
        Command::AppUrl => Ok(builder.application_url()),
        Command::Anchor => Ok(builder.application_anchor()),
        Command::ProjectUrl { project_id } => {
            let project_id = ProjectId::new(project_id.as_str())?;
            Ok(builder.project_url(&project_id))
        }
        Command::EntityUrl {
            project_id,
            entity_type,
            iri,
        } => {
            let project_id = ProjectId::new(project_id.as_str())?;
            let entity = EntityRef::new(entity_type.parse::<EntityType>()?, iri.as_str())?;
            debug!(entity = %entity, "building entity url");
            Ok(builder.entity_url(&project_id, &entity))
        }
        Command::Encode(args) => run_encode(args),
        Command::Decode { input } => run_decode(input),
        Command::Perspectives => Ok(perspective_table(builder.resolver())),
    }
}

fn run_encode(args: &EncodeArgs) -> Result<String> {
    let project_id = ProjectId::new(args.project_id.as_str())?;
    let perspective_id = match &args.perspective {
        Some(name) => PerspectiveId::new(name.as_str())?,
        None => PerspectiveId::default(),
    };
    let selection = args
        .entities
        .iter()
        .map(String::as_str)
        .map(parse_entity)
        .collect::<Result<Selection>>()?;
    let place = Place::new(project_id, perspective_id, selection);
    Ok(PlaceCodec.encode_fragment(&place))
}

fn parse_entity(spec: &str) -> Result<EntityRef> {
    let (tag, iri) = spec
        .split_once('=')
        .ok_or_else(|| anyhow!("expected TYPE=IRI, got {spec:?}"))?;
    let entity_type: EntityType = tag.parse()?;
    Ok(EntityRef::new(entity_type, iri)?)
}

fn run_decode(input: &str) -> Result<String> {
    let place = if input.contains("://") {
        PlaceCodec.decode_url(input)?
    } else {
        PlaceCodec.decode_fragment(input)?
    };
    info!(
        project = %place.project_id(),
        selected = place.selection().len(),
        "decoded place"
    );
    Ok(place_table(&place))
}

fn place_table(place: &Place) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Field", "Value"]);
    table.add_row(vec!["Project", place.project_id().as_str()]);
    table.add_row(vec!["Perspective", place.perspective_id().as_str()]);
    for entity in place.selection() {
        table.add_row(vec![entity.entity_type().label(), entity.iri()]);
    }
    table.to_string()
}

fn perspective_table(resolver: &PerspectiveResolver) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Entity type", "Perspective"]);
    for entity_type in EntityType::ALL {
        table.add_row(vec![
            entity_type.tag().to_string(),
            resolver.resolve(entity_type).to_string(),
        ]);
    }
    table.to_string()
}
