pub(crate) mod meta_images;
