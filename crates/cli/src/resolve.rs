use crate::view::ResultRow;
use grail_groovy::resolve::ResolveResult;
use grail_groovy::syntax::CallSiteId;
use grail_runtime::LoadedWorkspace;
use serde::Serialize;
use tabled::Table;
use tabled::settings::Style;
use tracing::debug;

#[derive(Serialize)]
struct CallResults<'a> {
    call: u32,
    results: &'a [ResolveResult],
}

pub fn run(
    ws: &LoadedWorkspace,
    call: Option<u32>,
    incomplete: bool,
    json: bool,
) -> Result<String, Box<dyn std::error::Error>> {
    let ids: Vec<CallSiteId> = match call {
        Some(id) => vec![CallSiteId(id)],
        None => ws.call_sites().map(|(_, site)| site.id()).collect(),
    };
    debug!("Resolving {} call sites (incomplete: {})", ids.len(), incomplete);

    let mut resolved = Vec::with_capacity(ids.len());
    for id in ids {
        resolved.push((id, ws.call(id)?.multi_resolve(incomplete)));
    }

    if json {
        let out: Vec<_> = resolved
            .iter()
            .map(|(id, results)| CallResults {
                call: id.0,
                results,
            })
            .collect();
        return Ok(format!("{}\n", serde_json::to_string_pretty(&out)?));
    }

    let rows: Vec<ResultRow> = resolved
        .iter()
        .flat_map(|(id, results)| results.iter().map(|r| ResultRow::new(id.0, r)))
        .collect();
    if rows.is_empty() {
        return Ok("No constructors resolved.\n".to_string());
    }
    Ok(format!("{}\n", Table::new(&rows).with(Style::psql())))
}

pub fn variants(ws: &LoadedWorkspace, call: u32) -> Result<String, Box<dyn std::error::Error>> {
    let variants = ws.call(CallSiteId(call))?.call_variants();
    if variants.is_empty() {
        return Ok(format!("No variants for call {}.\n", call));
    }
    let rows: Vec<ResultRow> = variants.iter().map(|r| ResultRow::new(call, r)).collect();
    Ok(format!("{}\n", Table::new(&rows).with(Style::psql())))
}
