pub mod input;
pub mod output;

use anyhow::{Context, Result, bail};
use reelname_config::ResolvedConfig;
use reelname_core::{
    NamingPattern, NumberSequence, Timecode, apply_suffix_pattern,
    detect_version, extract_reel_clip, group_by_resolution,
    parse_timecode_to_frame, plan_numbered_renames, plan_reel_clip_renames,
    plan_stripped_renames, stacked_layer_name, strip_frame_range_and_extension,
};
use std::io::Write;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanMode {
    Reel,
    Strip,
    Numbered,
}

#[derive(Debug, Clone, Default)]
pub struct NumberingOverrides {
    pub template: Option<String>,
    pub start: Option<u64>,
    pub step: Option<u64>,
}

impl NumberingOverrides {
    fn resolve(
        &self,
        config: &ResolvedConfig,
    ) -> Result<(NamingPattern, NumberSequence)> {
        let pattern = match &self.template {
            Some(template) => NamingPattern::parse(template)
                .with_context(|| format!("invalid --template '{template}'"))?,
            None => config.naming.clone(),
        };
        let step = self.step.unwrap_or(config.sequence.step);
        if step == 0 {
            bail!("--step must be greater than zero");
        }
        let sequence = NumberSequence::new(
            self.start.unwrap_or(config.sequence.start),
            step,
        );
        Ok((pattern, sequence))
    }
}

pub fn run_reel<W: Write>(out: &mut W, names: &[String]) -> Result<()> {
    for name in names {
        writeln!(out, "{}", extract_reel_clip(name))?;
    }
    Ok(())
}

pub fn run_strip<W: Write>(out: &mut W, names: &[String]) -> Result<()> {
    for name in names {
        writeln!(out, "{}", strip_frame_range_and_extension(name))?;
    }
    Ok(())
}

pub fn run_render<W: Write>(
    out: &mut W,
    config: &ResolvedConfig,
    template: Option<&str>,
    number: u64,
) -> Result<()> {
    let overrides = NumberingOverrides {
        template: template.map(str::to_string),
        ..NumberingOverrides::default()
    };
    let (pattern, _) = overrides.resolve(config)?;
    writeln!(out, "{}", pattern.render(number))?;
    Ok(())
}

/// Prints the rendered suffix, or the full stacked name when `base` is set.
pub fn run_suffix<W: Write>(
    out: &mut W,
    config: &ResolvedConfig,
    template: Option<&str>,
    base: Option<&str>,
    layer: u64,
) -> Result<()> {
    let template = template.unwrap_or(&config.layer_suffix);
    let rendered = match base {
        Some(base) => stacked_layer_name(base, template, layer),
        None => apply_suffix_pattern(template, layer),
    };
    writeln!(out, "{rendered}")?;
    Ok(())
}

pub fn run_timecode<W: Write>(
    out: &mut W,
    config: &ResolvedConfig,
    timecodes: &[String],
    fps: Option<u32>,
) -> Result<()> {
    let fps = fps.unwrap_or(config.frame_rate);
    for timecode in timecodes {
        writeln!(out, "{}", parse_timecode_to_frame(timecode, fps))?;
    }
    Ok(())
}

pub fn run_frames<W: Write>(
    out: &mut W,
    config: &ResolvedConfig,
    frames: &[u64],
    fps: Option<u32>,
) -> Result<()> {
    let fps = fps.unwrap_or(config.frame_rate);
    for frame in frames {
        let timecode = Timecode::from_frame(*frame, fps).with_context(|| {
            format!("frame {frame} does not fit a timecode at {fps} fps")
        })?;
        writeln!(out, "{timecode}")?;
    }
    Ok(())
}

pub fn run_version<W: Write>(
    out: &mut W,
    config: &ResolvedConfig,
    paths: &[String],
    json: bool,
) -> Result<()> {
    for path in paths {
        let asset = detect_version(path, &config.shot_rules);
        output::write_version(out, path, asset.as_ref(), json)?;
    }
    Ok(())
}

pub fn run_plan<W: Write>(
    out: &mut W,
    config: &ResolvedConfig,
    mode: PlanMode,
    numbering: &NumberingOverrides,
    names: &[String],
    json: bool,
) -> Result<()> {
    let plan = match mode {
        PlanMode::Reel => plan_reel_clip_renames(names),
        PlanMode::Strip => plan_stripped_renames(names),
        PlanMode::Numbered => {
            let (pattern, sequence) = numbering.resolve(config)?;
            plan_numbered_renames(names, &pattern, sequence)
        }
    };
    debug!(
        "{:?} plan: {} of {} names change",
        mode,
        plan.changed_count(),
        plan.len()
    );
    output::write_plan(out, &plan, json)
}

/// Input lines are `name<TAB>WxH`; output is one `WxH<TAB>name` line per
/// clip, largest resolution first.
pub fn run_resolutions<W: Write>(out: &mut W, lines: &[String]) -> Result<()> {
    let groups = group_by_resolution(
        lines.iter().map(|line| input::split_resolution_line(line)),
    );
    for (group, names) in &groups {
        for name in names {
            writeln!(out, "{group}\t{name}")?;
        }
    }
    Ok(())
}
