/// DOM operations the locale switcher needs from its host.
pub trait Document {
    type Element: Copy;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// Every element carrying `name`, in document order.
    fn elements_with_attribute(&self, name: &str) -> Vec<Self::Element>;

    fn attribute(&self, element: Self::Element, name: &str) -> Option<&str>;

    fn tag_name(&self, element: Self::Element) -> &str;

    /// Replaces the element's children with literal text.
    fn set_text(&mut self, element: Self::Element, text: &str);

    /// Replaces the element's children with trusted inline markup.
    fn set_markup(&mut self, element: Self::Element, markup: &str);

    fn toggle_class(&mut self, element: Self::Element, class: &str, enabled: bool);

    /// Sets the title shown by the browser tab.
    fn set_document_title(&mut self, title: &str);
}
