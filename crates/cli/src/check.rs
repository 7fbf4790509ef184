use crate::view::CheckRow;
use grail_runtime::LoadedWorkspace;
use grail_runtime::workspace::Diagnosis;
use rayon::prelude::*;
use tabled::Table;
use tabled::settings::Style;
use tracing::info;

pub fn run(ws: &LoadedWorkspace, problems_only: bool) -> Result<String, Box<dyn std::error::Error>> {
    let sites: Vec<_> = ws.call_sites().collect();

    // Results land in the shared cache; order follows the fixture.
    let diagnoses: Vec<_> = sites
        .par_iter()
        .map(|(file, site)| (*file, *site, ws.diagnose(file, site)))
        .collect();

    let problems = diagnoses.iter().filter(|(_, _, d)| d.is_problem()).count();
    info!("Checked {} call sites, {} problems", diagnoses.len(), problems);

    let rows: Vec<CheckRow> = diagnoses
        .into_iter()
        .filter(|(_, _, d)| !problems_only || d.is_problem())
        .map(|(file, site, diagnosis)| {
            let (status, detail) = describe(&diagnosis);
            CheckRow {
                file: file.path.clone().unwrap_or_else(|| "-".to_string()),
                call: site.id().0,
                type_name: site
                    .expr
                    .reference_element()
                    .map(|r| r.name.as_str())
                    .or_else(|| site.expr.type_element())
                    .unwrap_or("-")
                    .to_string(),
                status: status.to_string(),
                detail,
            }
        })
        .collect();

    let mut out = String::new();
    if !rows.is_empty() {
        out.push_str(&Table::new(&rows).with(Style::psql()).to_string());
        out.push('\n');
    }
    out.push_str(&format!("{} call sites, {} problems\n", sites.len(), problems));
    Ok(out)
}

fn describe(diagnosis: &Diagnosis) -> (&'static str, String) {
    match diagnosis {
        Diagnosis::Resolved(signature) => ("ok", signature.clone()),
        Diagnosis::DefaultConstructor(class) => ("ok", format!("{}()", class)),
        Diagnosis::Ambiguous(n) => ("ambiguous", format!("{} candidates", n)),
        Diagnosis::NoApplicableConstructor => ("no-match", "no applicable constructor".to_string()),
        Diagnosis::UnresolvedReference => ("unresolved", "cannot resolve class".to_string()),
        Diagnosis::ArrayCreation => ("array", "-".to_string()),
    }
}
