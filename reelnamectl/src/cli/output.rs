use anyhow::Result;
use reelname_core::{RenameEntry, RenamePlan, VersionedAssetName};
use std::io::Write;

fn status(entry: &RenameEntry) -> &'static str {
    match (entry.matched, entry.changed) {
        (false, _) => "unmatched",
        (true, false) => "unchanged",
        (true, true) => "renamed",
    }
}

/// `original<TAB>proposed<TAB>status` per entry, or the plan as JSON.
pub fn write_plan<W: Write>(
    out: &mut W,
    plan: &RenamePlan,
    json: bool,
) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, plan)?;
        writeln!(out)?;
        return Ok(());
    }

    for entry in &plan.entries {
        writeln!(
            out,
            "{}\t{}\t{}",
            entry.original,
            entry.proposed,
            status(entry)
        )?;
    }
    Ok(())
}

pub fn write_version<W: Write>(
    out: &mut W,
    path: &str,
    asset: Option<&VersionedAssetName>,
    json: bool,
) -> Result<()> {
    if json {
        let line = serde_json::json!({ "path": path, "asset": asset });
        writeln!(out, "{line}")?;
        return Ok(());
    }

    match asset {
        Some(asset) => writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}",
            path,
            asset.base_name,
            asset.scene_name.as_deref().unwrap_or("-"),
            asset.shot_id.as_deref().unwrap_or("-"),
            asset.take.as_deref().unwrap_or("-"),
            asset.version_tag()
        )?,
        None => writeln!(out, "{path}\tno version")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelname_core::plan_reel_clip_renames;

    #[test]
    fn test_write_plan_tsv() {
        let plan = plan_reel_clip_renames(&["A001_10060927_C005.mov", "x.txt"]);
        let mut buf = Vec::new();
        write_plan(&mut buf, &plan, false).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "A001_10060927_C005.mov\tA001C005\trenamed\nx.txt\tx.txt\tunmatched\n"
        );
    }

    #[test]
    fn test_write_version_without_marker() {
        let mut buf = Vec::new();
        write_version(&mut buf, "plate.exr", None, false).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "plate.exr\tno version\n");
    }
}
