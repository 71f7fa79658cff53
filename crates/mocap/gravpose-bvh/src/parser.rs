//! BVH text parser.
//!
//! Accepts the usual `HIERARCHY` block (nested `ROOT` / `JOINT` / `End Site`
//! with `OFFSET` and `CHANNELS`) followed by `MOTION`, `Frames:`,
//! `Frame Time:` and one whitespace-separated line per frame. Channel slots
//! are assigned in declaration order, so a joint's values are contiguous in
//! every frame row.

use tracing::debug;

use crate::error::{BvhError, Result};

/// One animated degree of freedom.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Xposition,
    Yposition,
    Zposition,
    Xrotation,
    Yrotation,
    Zrotation,
}

impl Channel {
    #[inline]
    pub fn is_position(self) -> bool {
        matches!(
            self,
            Channel::Xposition | Channel::Yposition | Channel::Zposition
        )
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "Xposition" => Channel::Xposition,
            "Yposition" => Channel::Yposition,
            "Zposition" => Channel::Zposition,
            "Xrotation" => Channel::Xrotation,
            "Yrotation" => Channel::Yrotation,
            "Zrotation" => Channel::Zrotation,
            _ => return None,
        })
    }

    /// Axis index 0..3.
    #[inline]
    pub fn axis(self) -> usize {
        match self {
            Channel::Xposition | Channel::Xrotation => 0,
            Channel::Yposition | Channel::Yrotation => 1,
            Channel::Zposition | Channel::Zrotation => 2,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BvhJoint {
    /// Name as written in the file. End sites are named `<parent>_End`.
    pub name: String,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    pub offset: [f32; 3],
    pub channels: Vec<Channel>,
    /// Index of this joint's first value in a frame row.
    pub channel_offset: usize,
    pub end_site: bool,
}

/// Parsed motion clip: joint hierarchy plus a dense frame table.
#[derive(Clone, Debug, PartialEq)]
pub struct BvhClip {
    joints: Vec<BvhJoint>,
    channel_count: usize,
    frame_count: usize,
    frame_time_s: f32,
    values: Vec<f32>,
}

impl BvhClip {
    pub fn joints(&self) -> &[BvhJoint] {
        &self.joints
    }

    pub fn root(&self) -> Option<&BvhJoint> {
        self.joints.iter().find(|j| j.parent.is_none())
    }

    pub fn joint(&self, name: &str) -> Option<&BvhJoint> {
        self.joints.iter().find(|j| j.name == name)
    }

    /// Values per frame row.
    #[inline]
    pub fn channel_count(&self) -> usize {
        self.channel_count
    }

    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Seconds per frame.
    #[inline]
    pub fn frame_time_s(&self) -> f32 {
        self.frame_time_s
    }

    pub fn duration_s(&self) -> f32 {
        self.frame_count as f32 * self.frame_time_s
    }

    pub fn frame(&self, index: usize) -> Option<&[f32]> {
        if index >= self.frame_count {
            return None;
        }
        let start = index * self.channel_count;
        self.values.get(start..start + self.channel_count)
    }

    /// `(channel, value)` pairs of `joint` within `row`.
    pub fn joint_values<'a>(
        &self,
        joint: &'a BvhJoint,
        row: &'a [f32],
    ) -> impl Iterator<Item = (Channel, f32)> + 'a {
        joint
            .channels
            .iter()
            .enumerate()
            .filter_map(move |(i, &c)| row.get(joint.channel_offset + i).map(|&v| (c, v)))
    }
}

/// Non-empty trimmed lines with their 1-based line numbers.
struct Lines<'a> {
    items: Vec<(usize, &'a str)>,
    pos: usize,
}

impl<'a> Lines<'a> {
    fn new(text: &'a str) -> Self {
        let items = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty())
            .collect();
        Self { items, pos: 0 }
    }

    fn next(&mut self) -> Option<(usize, &'a str)> {
        let item = self.items.get(self.pos).copied();
        if item.is_some() {
            self.pos += 1;
        }
        item
    }

    fn peek(&self) -> Option<(usize, &'a str)> {
        self.items.get(self.pos).copied()
    }

    fn remaining(&self) -> usize {
        self.items.len().saturating_sub(self.pos)
    }
}

fn parse_f32(line: usize, token: &str) -> Result<f32> {
    token.parse().map_err(|_| BvhError::InvalidNumber {
        line,
        token: token.to_string(),
    })
}

struct HierarchyBuilder {
    joints: Vec<BvhJoint>,
    channel_count: usize,
}

impl HierarchyBuilder {
    /// Parse one `ROOT` / `JOINT` / `End Site` block whose header is the next line.
    fn joint(&mut self, lines: &mut Lines<'_>, parent: Option<usize>) -> Result<()> {
        let Some((line, header)) = lines.next() else {
            return Err(BvhError::MissingHierarchy);
        };
        let (name, end_site) = if let Some(rest) = header
            .strip_prefix("ROOT")
            .or_else(|| header.strip_prefix("JOINT"))
        {
            let name = rest.split_whitespace().next().unwrap_or_default();
            if name.is_empty() {
                return Err(BvhError::UnexpectedLine {
                    line,
                    text: header.to_string(),
                });
            }
            (name.to_string(), false)
        } else if header.starts_with("End Site") {
            let parent_name = parent
                .map(|p| self.joints[p].name.as_str())
                .unwrap_or("root");
            (format!("{parent_name}_End"), true)
        } else {
            return Err(BvhError::UnexpectedLine {
                line,
                text: header.to_string(),
            });
        };

        match lines.next() {
            Some((_, "{")) => {}
            Some((l, _)) => return Err(BvhError::ExpectedOpenBrace { line: l }),
            None => return Err(BvhError::UnterminatedJoint { joint: name }),
        }

        let idx = self.joints.len();
        if let Some(p) = parent {
            self.joints[p].children.push(idx);
        }
        self.joints.push(BvhJoint {
            name,
            parent,
            children: Vec::new(),
            offset: [0.0; 3],
            channels: Vec::new(),
            channel_offset: self.channel_count,
            end_site,
        });

        loop {
            let Some((line, text)) = lines.peek() else {
                return Err(BvhError::UnterminatedJoint {
                    joint: self.joints[idx].name.clone(),
                });
            };
            if text == "}" {
                lines.next();
                return Ok(());
            }
            if text.starts_with("JOINT") || text.starts_with("End Site") {
                self.joint(lines, Some(idx))?;
                continue;
            }
            lines.next();
            let mut parts = text.split_whitespace();
            match parts.next() {
                Some("OFFSET") => {
                    let mut offset = [0.0; 3];
                    for slot in offset.iter_mut() {
                        let tok = parts.next().ok_or_else(|| BvhError::UnexpectedLine {
                            line,
                            text: text.to_string(),
                        })?;
                        *slot = parse_f32(line, tok)?;
                    }
                    self.joints[idx].offset = offset;
                }
                Some("CHANNELS") => {
                    let declared_tok = parts.next().unwrap_or_default();
                    let declared: usize =
                        declared_tok.parse().map_err(|_| BvhError::InvalidNumber {
                            line,
                            token: declared_tok.to_string(),
                        })?;
                    let channels = parts
                        .map(|name| {
                            Channel::from_name(name).ok_or_else(|| BvhError::UnknownChannel {
                                line,
                                name: name.to_string(),
                            })
                        })
                        .collect::<Result<Vec<_>>>()?;
                    if channels.len() != declared {
                        return Err(BvhError::ChannelCount {
                            line,
                            declared,
                            listed: channels.len(),
                        });
                    }
                    // Slots are assigned as CHANNELS lines are met, which is
                    // declaration order for well-formed files.
                    self.joints[idx].channel_offset = self.channel_count;
                    self.channel_count += channels.len();
                    self.joints[idx].channels = channels;
                }
                _ => {
                    return Err(BvhError::UnexpectedLine {
                        line,
                        text: text.to_string(),
                    })
                }
            }
        }
    }
}

/// Parse a complete BVH document.
pub fn parse_bvh(text: &str) -> Result<BvhClip> {
    let mut lines = Lines::new(text);
    match lines.next() {
        Some((_, "HIERARCHY")) => {}
        _ => return Err(BvhError::MissingHierarchy),
    }

    let mut builder = HierarchyBuilder {
        joints: Vec::new(),
        channel_count: 0,
    };
    builder.joint(&mut lines, None)?;

    loop {
        match lines.next() {
            Some((_, "MOTION")) => break,
            Some(_) => continue,
            None => return Err(BvhError::MissingMotion),
        }
    }

    let frames_line = lines.next().map(|(_, l)| l).unwrap_or_default();
    let frame_count = frames_line
        .strip_prefix("Frames:")
        .and_then(|rest| rest.trim().parse::<usize>().ok())
        .ok_or_else(|| BvhError::MissingFrames {
            found: frames_line.to_string(),
        })?;

    let (time_line_no, time_line) = lines.next().unwrap_or((0, ""));
    let time_tok = time_line
        .strip_prefix("Frame Time:")
        .map(str::trim)
        .ok_or_else(|| BvhError::MissingFrameTime {
            found: time_line.to_string(),
        })?;
    let frame_time_s = parse_f32(time_line_no, time_tok)?;
    if !(frame_time_s.is_finite() && frame_time_s > 0.0) {
        return Err(BvhError::InvalidFrameTime(frame_time_s));
    }

    let channel_count = builder.channel_count;
    // `Frames:` is untrusted; never reserve more than the text could hold.
    let capacity = frame_count
        .checked_mul(channel_count)
        .map_or(0, |n| n.min(text.len()));
    let mut values = Vec::with_capacity(capacity);
    for frame in 0..frame_count {
        let Some((line, row)) = lines.next() else {
            return Err(BvhError::MissingFrameData {
                expected: frame_count,
                found: frame,
            });
        };
        let before = values.len();
        for tok in row.split_whitespace() {
            values.push(parse_f32(line, tok)?);
        }
        let found = values.len() - before;
        if found != channel_count {
            return Err(BvhError::FrameWidth {
                frame,
                expected: channel_count,
                found,
            });
        }
    }
    let extra = lines.remaining();
    if extra > 0 {
        return Err(BvhError::ExtraFrameData {
            expected: frame_count,
            found: frame_count + extra,
        });
    }

    debug!(
        joints = builder.joints.len(),
        channels = channel_count,
        frames = frame_count,
        frame_time_s,
        "parsed BVH clip"
    );

    Ok(BvhClip {
        joints: builder.joints,
        channel_count,
        frame_count,
        frame_time_s,
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TINY: &str = "HIERARCHY
ROOT Hips
{
  OFFSET 0 1 0
  CHANNELS 6 Xposition Yposition Zposition Zrotation Xrotation Yrotation
  JOINT Spine
  {
    OFFSET 0 2 0
    CHANNELS 3 Zrotation Xrotation Yrotation
    End Site
    {
      OFFSET 0 3 0
    }
  }
}
MOTION
Frames: 2
Frame Time: 0.04
1 2 3 4 5 6 7 8 9
9 8 7 6 5 4 3 2 1
";

    #[test]
    fn parses_hierarchy_and_frames() {
        let clip = parse_bvh(TINY).unwrap();
        assert_eq!(clip.joints().len(), 3);
        assert_eq!(clip.channel_count(), 9);
        assert_eq!(clip.frame_count(), 2);
        assert_eq!(clip.frame_time_s(), 0.04);

        let spine = clip.joint("Spine").unwrap();
        assert_eq!(spine.channel_offset, 6);
        assert_eq!(spine.offset, [0.0, 2.0, 0.0]);
        let end = clip.joint("Spine_End").unwrap();
        assert!(end.end_site);
        assert!(end.channels.is_empty());
        assert_eq!(clip.root().unwrap().children, vec![1]);

        let row = clip.frame(1).unwrap();
        let spine_vals: Vec<_> = clip.joint_values(spine, row).collect();
        assert_eq!(
            spine_vals,
            vec![
                (Channel::Zrotation, 3.0),
                (Channel::Xrotation, 2.0),
                (Channel::Yrotation, 1.0)
            ]
        );
        assert!(clip.frame(2).is_none());
    }

    #[test]
    fn rejects_missing_header() {
        assert_eq!(parse_bvh("ROOT Hips\n{\n}\n"), Err(BvhError::MissingHierarchy));
    }

    #[test]
    fn rejects_missing_brace() {
        let err = parse_bvh("HIERARCHY\nROOT Hips\nOFFSET 0 0 0\n").unwrap_err();
        assert_eq!(err, BvhError::ExpectedOpenBrace { line: 3 });
    }

    #[test]
    fn rejects_missing_motion() {
        let err = parse_bvh("HIERARCHY\nROOT Hips\n{\nOFFSET 0 0 0\n}\n").unwrap_err();
        assert_eq!(err, BvhError::MissingMotion);
    }

    #[test]
    fn rejects_short_and_ragged_frames() {
        let short = TINY.replace("Frames: 2", "Frames: 3");
        assert_eq!(
            parse_bvh(&short),
            Err(BvhError::MissingFrameData {
                expected: 3,
                found: 2
            })
        );
        let ragged = TINY.replace("9 8 7 6 5 4 3 2 1", "9 8 7");
        assert!(matches!(
            parse_bvh(&ragged),
            Err(BvhError::FrameWidth {
                frame: 1,
                expected: 9,
                found: 3
            })
        ));
    }

    #[test]
    fn rejects_oversized_frame_count() {
        let huge = TINY.replace("Frames: 2", "Frames: 100000000000000");
        assert_eq!(
            parse_bvh(&huge),
            Err(BvhError::MissingFrameData {
                expected: 100_000_000_000_000,
                found: 2
            })
        );
        let overflow = TINY.replace("Frames: 2", &format!("Frames: {}", usize::MAX));
        assert!(matches!(
            parse_bvh(&overflow),
            Err(BvhError::MissingFrameData { found: 2, .. })
        ));
    }

    #[test]
    fn rejects_rows_beyond_frame_count() {
        let extra = TINY.replace("Frames: 2", "Frames: 1");
        assert_eq!(
            parse_bvh(&extra),
            Err(BvhError::ExtraFrameData {
                expected: 1,
                found: 2
            })
        );
        let trailing_blank = format!("{TINY}\n\n   \n");
        assert_eq!(parse_bvh(&trailing_blank).unwrap().frame_count(), 2);
    }

    #[test]
    fn rejects_bad_numbers_and_channels() {
        let bad = TINY.replace("OFFSET 0 2 0", "OFFSET 0 two 0");
        assert!(matches!(parse_bvh(&bad), Err(BvhError::InvalidNumber { .. })));
        let bad = TINY.replace("CHANNELS 3 Zrotation", "CHANNELS 3 Wrotation");
        assert!(matches!(parse_bvh(&bad), Err(BvhError::UnknownChannel { .. })));
        let bad = TINY.replace("CHANNELS 3", "CHANNELS 4");
        assert!(matches!(parse_bvh(&bad), Err(BvhError::ChannelCount { .. })));
        let bad = TINY.replace("Frame Time: 0.04", "Frame Rate: 25");
        assert!(matches!(parse_bvh(&bad), Err(BvhError::MissingFrameTime { .. })));
    }
}
