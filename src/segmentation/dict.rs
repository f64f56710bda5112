use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use vibrato::Dictionary;

use crate::core::YomimakuError;

const APP_NAME: &str = "yomimaku";
const IPADIC_FOLDER: &str = "ipadic-mecab-2_7_0";

fn get_app_data_dir() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        data_dir.join(APP_NAME)
    } else {
        PathBuf::from(".")
    }
}

pub fn default_dictionary_dir() -> PathBuf {
    get_app_data_dir().join("dictionaries").join(IPADIC_FOLDER)
}

/// Picks the dictionary file to load: an explicit override when given,
/// otherwise `system.dic` (or its zstd-compressed form) under the app data
/// directory.
pub fn resolve_dictionary(override_path: Option<&Path>) -> Result<PathBuf, YomimakuError> {
    if let Some(path) = override_path {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        return Err(YomimakuError::MissingDictionary(path.display().to_string()));
    }

    let dict_dir = default_dictionary_dir();
    find_system_dictionary(&dict_dir)
        .ok_or_else(|| YomimakuError::MissingDictionary(dict_dir.display().to_string()))
}

fn find_system_dictionary(dir: &Path) -> Option<PathBuf> {
    [dir.join("system.dic"), dir.join("system.dic.zst")]
        .into_iter()
        .find(|candidate| candidate.exists())
}

pub fn load_dictionary(path: &Path) -> Result<Dictionary, YomimakuError> {
    let file = File::open(path)?;
    let dict = if path.extension().map_or(false, |ext| ext.eq_ignore_ascii_case("zst")) {
        Dictionary::read(zstd::Decoder::new(file)?)?
    } else {
        Dictionary::read(BufReader::new(file))?
    };
    Ok(dict)
}
