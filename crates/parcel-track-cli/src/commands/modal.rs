use anyhow::{Context, Result, bail};
use parcel_track::{Gateway, ModalKind, ModalResult, PackageId, Page, PageEvent, PageUpdate};

/// Drive one dialog headlessly: open, fill, submit, apply the outcome.
pub async fn run(
    gateway: &dyn Gateway,
    page: &mut Page,
    package: PackageId,
    kind: ModalKind,
    new_title: Option<&str>,
) -> Result<()> {
    page.handle(PageEvent::Open { package, kind });
    if let Some(title) = new_title {
        page.modals.set_input(kind, title);
    }

    let request = page
        .handle(PageEvent::Submit(kind))
        .with_context(|| format!("{kind} refused to submit for package {package}"))?;
    let completion = request.execute(gateway).await;

    match page.complete(completion) {
        PageUpdate::Modal(_, ModalResult::Succeeded { package }) => {
            match kind {
                ModalKind::TitleInput => {
                    let label = page
                        .list
                        .row(package)
                        .map(|row| row.label.as_str())
                        .unwrap_or_default();
                    println!("Renamed package {package} to \"{label}\"");
                }
                ModalKind::Delete => {
                    println!("Deleted package {package}");
                    if let Some(prompt) = page.list.empty_prompt() {
                        println!("{prompt}");
                    }
                }
            }
            Ok(())
        }
        PageUpdate::Modal(_, ModalResult::Failed(err)) => {
            bail!("{} failed for package {package}: {err}", kind.title())
        }
        other => bail!("unexpected completion for {kind}: {other:?}"),
    }
}
