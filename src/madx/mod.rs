//! Text templates for driving MAD-X.
//!
//! Nothing here computes anything; the table is a fixed asset and
//! [`render`] only fills the positional `{}` slots, with Python
//! `str.format` escaping (`{{` -> `{`, `}}` -> `}`).
mod grammar;

pub use grammar::MADX_SYNTAX;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("no MAD-X command named `{0}`")]
    UnknownCommand(String),

    #[error("template has {expected} slots but {found} arguments were given")]
    ArgumentCount { expected: usize, found: usize },

    #[error("named or indexed field at byte {0}, only `{{}}` slots are supported")]
    NamedField(usize),

    #[error("unmatched `}}` at byte {0}")]
    UnmatchedBrace(usize),
}

pub fn template(key: &str) -> Option<&'static str> {
    MADX_SYNTAX
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, text)| *text)
}

pub fn keys() -> impl Iterator<Item = &'static str> {
    MADX_SYNTAX.iter().map(|(name, _)| *name)
}

/// Number of `{}` slots in a template.
pub fn slot_count(template: &str) -> Result<usize, TemplateError> {
    let bytes = template.as_bytes();
    let mut slots = 0;
    let mut i = 0;
    while i < bytes.len() {
        match (bytes[i], bytes.get(i + 1)) {
            (b'{', Some(b'{')) | (b'}', Some(b'}')) => i += 2,
            (b'{', Some(b'}')) => {
                slots += 1;
                i += 2;
            }
            (b'{', _) => return Err(TemplateError::NamedField(i)),
            (b'}', _) => return Err(TemplateError::UnmatchedBrace(i)),
            _ => i += 1,
        }
    }
    Ok(slots)
}

/// Fill the `{}` slots of `template` with `args`, in order.
///
/// The argument count must match the slot count exactly.
pub fn render<S: AsRef<str>>(template: &str, args: &[S]) -> Result<String, TemplateError> {
    let expected = slot_count(template)?;
    if expected != args.len() {
        return Err(TemplateError::ArgumentCount {
            expected,
            found: args.len(),
        });
    }

    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut rest = template;
    // slot_count already rejected anything but `{{`, `}}` and `{}`
    while let Some(pos) = rest.find(|c| c == '{' || c == '}') {
        out.push_str(&rest[..pos]);
        match &rest[pos..pos + 2] {
            "{}" => {
                if let Some(arg) = args.next() {
                    out.push_str(arg.as_ref());
                }
            }
            "{{" => out.push('{'),
            _ => out.push('}'),
        }
        rest = &rest[pos + 2..];
    }
    out.push_str(rest);
    Ok(out)
}

/// Render the command registered under `key`.
pub fn command<S: AsRef<str>>(key: &str, args: &[S]) -> Result<String, TemplateError> {
    let text = template(key).ok_or_else(|| TemplateError::UnknownCommand(key.to_string()))?;
    render(text, args)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_ARGS: [&str; 0] = [];

    #[test]
    fn table_has_every_command() {
        let expected = [
            "beam",
            "show_beam",
            "call_file",
            "use_sequence",
            "save_beta",
            "makethin",
            "twiss_beamline",
            "track_beamline",
            "ptc_twiss_beamline",
            "run_track_beamline",
            "start_particle",
            "observe",
            "end_track",
            "stop",
            "rbarc",
            "select_columns",
            "eager_variable",
            "lazy_variable",
            "ptc_create_universe",
            "ptc_create_layout",
            "ptc_align",
            "ptc_end",
            "ptc_observe",
            "ptc_start",
            "ptc_track",
            "ptc_track_end",
        ];
        assert_eq!(keys().collect::<Vec<_>>(), expected.to_vec());
        for (_, text) in MADX_SYNTAX {
            assert!(text.ends_with(';'), "{}", text);
            assert!(slot_count(text).is_ok(), "{}", text);
        }
    }

    #[test]
    fn beam_keeps_second_stage_placeholders() {
        assert_eq!(
            command("beam", &NO_ARGS).unwrap(),
            "BEAM, PARTICLE={{PARTICLE}}, PC={{PC}};"
        );
    }

    #[test]
    fn positional_commands() {
        assert_eq!(
            command("call_file", &["lattice.madx"]).unwrap(),
            "CALL, FILE='lattice.madx';"
        );
        assert_eq!(
            command("start_particle", &["0.001", "0.0", "-0.002", "0.0", "0.01"]).unwrap(),
            "START, X=0.001, PX=0.0, Y=-0.002, PY=0.0, T=0.0, PT=0.01;"
        );
        assert_eq!(
            command("eager_variable", &["K1Q1", "K1Q1"]).unwrap(),
            "K1Q1 = {{ K1Q1 }};"
        );
        assert_eq!(
            command("lazy_variable", &[String::from("L"), String::from("LQ")]).unwrap(),
            "L := {{ LQ }};"
        );
    }

    #[test]
    fn twiss_template_is_verbatim() {
        let text = command("twiss_beamline", &["twiss.outx", ",RMATRIX"]).unwrap();
        assert!(text.starts_with("TWISS,BETX={{ BETAX }},ALFX= {{ ALPHAX}},MUX=0.0,"));
        assert!(text.contains(",PY= 0.0,T=0.0,PT=0.0,DELTAP={{ DELTAP }},"));
        assert!(text.ends_with("FILE=twiss.outx,RMATRIX;"));
        assert_eq!(slot_count(template("ptc_track").unwrap()), Ok(9));
    }

    #[test]
    fn argument_count_must_match() {
        assert_eq!(
            command("save_beta", &["B0"]),
            Err(TemplateError::ArgumentCount {
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            command("stop", &["extra"]),
            Err(TemplateError::ArgumentCount {
                expected: 0,
                found: 1
            })
        );
    }

    #[test]
    fn malformed_templates() {
        assert_eq!(
            command("nonexistent", &NO_ARGS),
            Err(TemplateError::UnknownCommand("nonexistent".to_string()))
        );
        assert_eq!(render("A={name};", &NO_ARGS), Err(TemplateError::NamedField(2)));
        assert_eq!(render("A=};", &NO_ARGS), Err(TemplateError::UnmatchedBrace(2)));
        assert_eq!(render("A={", &NO_ARGS), Err(TemplateError::NamedField(2)));
    }
}
