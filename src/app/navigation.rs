use url::Url;

/// Where "go to this document" ends up. The desktop build hands the URL to
/// the system browser.
pub trait Navigator {
    fn open(&mut self, url: &Url);
}

#[derive(Debug, Default)]
pub struct SystemBrowser;

impl Navigator for SystemBrowser {
    fn open(&mut self, url: &Url) {
        if let Err(e) = open::that(url.as_str()) {
            tracing::error!("Failed to open {}: {}", url, e);
        }
    }
}

#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct RecordingNavigator(std::rc::Rc<std::cell::RefCell<Vec<String>>>);

#[cfg(test)]
impl RecordingNavigator {
    pub fn visited(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
}

#[cfg(test)]
impl Navigator for RecordingNavigator {
    fn open(&mut self, url: &Url) {
        self.0.borrow_mut().push(url.to_string());
    }
}
