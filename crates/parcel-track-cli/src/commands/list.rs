use parcel_track::TrackedPackage;

const MAX_TITLE_WIDTH: usize = 40;

pub fn run(packages: &[TrackedPackage]) {
    if packages.is_empty() {
        println!("{}", parcel_track::list::EMPTY_PROMPT);
        return;
    }

    let title_width = packages
        .iter()
        .map(|p| p.title.chars().count())
        .max()
        .unwrap_or(0)
        .min(MAX_TITLE_WIDTH);

    for package in packages {
        println!(
            "{:>6}  {:<width$}  {}",
            package.id,
            package.title,
            package.tracking_number.as_deref().unwrap_or(""),
            width = title_width
        );
    }

    println!("\n{} packages", packages.len());
}
