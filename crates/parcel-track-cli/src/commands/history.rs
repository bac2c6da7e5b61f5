use anyhow::{Context, Result, bail};
use parcel_track::{Gateway, PackageId, Page, PageEvent, PageUpdate, SectionNode, SectionState};

/// Expand a package's section, wait for its load, and print what renders.
pub async fn run(gateway: &dyn Gateway, page: &mut Page, package: PackageId) -> Result<()> {
    let request = page
        .handle(PageEvent::Expanded(package))
        .with_context(|| format!("section for package {package} is already loading"))?;
    let completion = request.execute(gateway).await;

    let state = match page.complete(completion) {
        PageUpdate::Section(_, state) => state,
        other => bail!("unexpected completion for package {package}: {other:?}"),
    };

    let section = page
        .accordion
        .section(package)
        .context("section vanished after loading")?;

    for node in &section.body {
        match node {
            SectionNode::Records(records) => {
                for record in records {
                    println!("{}  {:>8}  {}", record.date, record.time, record.data);
                }
            }
            SectionNode::Placeholder(text) => println!("{text}"),
            SectionNode::Failure(text) => eprintln!("{text}"),
            SectionNode::Spinner(_) => {}
        }
    }

    if state == SectionState::Failed {
        bail!("could not load tracking data for package {package}");
    }
    Ok(())
}
